//! PDF splitting operations.
//!
//! Three modes are supported:
//!
//! - [`SplitOptions::AllPages`](crate::config::SplitOptions::AllPages): one
//!   file per page, named `<stem>_p<N>.pdf`
//! - [`SplitOptions::EachRange`](crate::config::SplitOptions::EachRange): one
//!   file per range token, named `PDFManager_result_<stem>_p<N>.pdf` or
//!   `PDFManager_result_<stem>_p<A>-<B>.pdf`
//! - [`SplitOptions::CombinedRanges`](crate::config::SplitOptions::CombinedRanges):
//!   every requested page in one file, named
//!   `PDFManager_result_<stem>_split_<tokens>.pdf`

pub mod splitter;

pub use splitter::{PlannedOutput, SplitReport, Splitter, plan_split};
