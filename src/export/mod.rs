//! Export of a change record as a set of named sheets.
//!
//! - [`model`] - cells, sheets and workbooks
//! - [`projector`] - record to workbook, with conditional sheets
//! - [`filename`] - `ECA_<id>_<date>` naming
//! - [`writer`] - CSV bundle, JSON and YAML writers

pub mod filename;
pub mod model;
pub mod projector;
pub mod writer;

pub use filename::export_filename;
pub use model::{Cell, Sheet, Workbook};
pub use projector::{export_tab_names, project, Projector};
pub use writer::{
    export_record, CsvBundleWriter, ExportFormat, JsonWriter, WorkbookWriter, XlsxWriter,
    YamlWriter,
};
