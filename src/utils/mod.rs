mod io_utils;
mod math;
mod readers;
mod region;

pub use io_utils::{create_writer, output_path};
pub use math::{fraction, max_defined};
pub use readers::open_table_reader;
pub use region::GenomicRegion;

pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}
