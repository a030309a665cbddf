pub mod crime_report;
pub mod media_attachment;

pub use crime_report::CrimeReport;
pub use media_attachment::{CreateMediaAttachment, MediaAttachment};
