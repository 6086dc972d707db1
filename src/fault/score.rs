use crate::assertion::Assertions;

const BONUS: f64 = 10.0;
const CIRCUIT_BREAKER_WORDS: [&str; 2] = ["circuit", "breaker"];
const STANDARD_ERROR_WORDS: [&str; 2] = ["code", "error"];

/// `100 * passed / total`, plus a flat bonus when the case's assertions
/// mention circuit breaking and another when they check error codes,
/// capped at 100.
#[must_use]
pub fn robustness_score(passed: usize, total: usize, assertions: &Assertions) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let mut score = passed.min(total) as f64 / total as f64 * 100.0;
    if assertions.mentions_any(&CIRCUIT_BREAKER_WORDS) {
        score += BONUS;
    }
    if assertions.mentions_any(&STANDARD_ERROR_WORDS) {
        score += BONUS;
    }
    score.min(100.0)
}
