mod entry;
mod logger;

use caseforge::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
