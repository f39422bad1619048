pub mod draft_dump;

pub use draft_dump::{find_dump_link, strip_preamble, DraftDumpFetcher};
