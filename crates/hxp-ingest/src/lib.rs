pub mod ingest;
pub mod table;
pub mod xml;

pub use ingest::{IngestArtifacts, extract_table, ingest};
pub use table::{AttributeTable, read_csv_table};
pub use xml::{XmlDocument, XmlElement, parse_document, parse_str, write_document};
