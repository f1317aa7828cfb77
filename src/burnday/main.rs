use std::path::Path;

use chrono::Local;
use pbd::{
    check::{Paths, check_page},
    page::Layout,
};

mod constants {
    macro_rules! env_or_default {
        ($name:expr, $default:expr) => {
            if let Some(s) = option_env!($name) {
                s
            } else {
                $default
            }
        };
    }

    pub const URL: &str = env_or_default!("BURNDAY_URL", "https://itwebservices.placer.ca.gov/APCDBDI/home/");
    pub const DATA_DIR: &str = env_or_default!("BURNDAY_DATA_DIR", "data");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    use constants::{DATA_DIR, URL};

    pretty_env_logger::init_timed();

    let client = pbd::scrape::basic()?;
    let (body, _) = pbd::scrape::fetch(&client, URL).await?;

    let dir = Path::new(DATA_DIR);
    std::fs::create_dir_all(dir)?;
    let paths = Paths::in_dir(dir);

    let now = Local::now();
    match check_page(&body, &Layout::default(), &paths, now) {
        Ok(eval) => {
            tracing::info!(target: "main", "{}: {:?} (column {:?}), allowed = {}", now.date_naive(), eval.status, eval.column, eval.status.allowed());
            Ok(())
        }
        Err(e) => {
            tracing::error!(target: "main", "\x1b[31m{e}\x1b[0m");
            Err(e.into())
        }
    }
}
