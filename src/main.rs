mod entry;

use tamperx::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
