use hdrhistogram::Histogram;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Latency histogram with microsecond resolution; the API speaks seconds.
#[derive(Debug)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new latency histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, String> {
        let hist = Histogram::<u64>::new(3)
            .map_err(|err| format!("Failed to create histogram: {}", err))?;
        Ok(Self { hist })
    }

    /// Record a latency given in seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be recorded.
    pub fn record_secs(&mut self, latency_secs: f64) -> Result<(), String> {
        let micros = (latency_secs * MICROS_PER_SECOND).round();
        let value = if micros.is_finite() && micros >= 1.0 {
            micros as u64
        } else {
            1
        };
        self.hist
            .record(value)
            .map_err(|err| format!("Failed to record latency: {}", err))
    }

    /// p50, p90 and p99 in seconds; zeros when empty.
    #[must_use]
    pub fn percentiles_secs(&self) -> (f64, f64, f64) {
        if self.count() == 0 {
            return (0.0, 0.0, 0.0);
        }

        (
            self.quantile_secs(0.5),
            self.quantile_secs(0.9),
            self.quantile_secs(0.99),
        )
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }

    fn quantile_secs(&self, quantile: f64) -> f64 {
        self.hist.value_at_quantile(quantile) as f64 / MICROS_PER_SECOND
    }
}
