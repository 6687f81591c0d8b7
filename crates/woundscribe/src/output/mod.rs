//! Writing per-patient output files.
//!
//! Each resolved document becomes one file at
//! `<output_root>/<clinic>/<file_label>.<ext>`. The physical slicing is done
//! by a [`DocumentSlicer`]; this module only decides where files go.

mod layout;
mod slicer;

pub use layout::{OutputLayout, destination_path};
pub use slicer::{DocumentSlicer, LopdfSlicer};
