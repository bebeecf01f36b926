//! Document properties and their wire encoding.
//!
//! The engine reads properties as a FlatBuffers `ExcelPropertiesModel` table.
//! Fields are only ever appended as new vtable slots, so old engines keep
//! reading new buffers and the file identifier names the schema revision.

use crate::error::{OfficeError, Result};
use flatbuffers::{FlatBufferBuilder, Follow, Table, VOffsetT, Verifiable, Verifier};
use serde::{Deserialize, Serialize};

/// FlatBuffers file identifier for revision 1 of the properties schema.
pub const PROPERTIES_IDENTIFIER: &str = "OXP1";

const VT_IS_IN_MEMORY: VOffsetT = 4;
const VT_IS_EDITABLE: VOffsetT = 6;

/// Options the engine uses when creating or opening a workbook.
///
/// The default is in-memory and editable, as the Go and Python bindings send.
/// The C# and Java bindings default `is_in_memory` to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcelProperties {
    /// Keep the workbook's working storage in memory instead of on disk.
    pub is_in_memory: bool,
    /// Open the workbook for modification.
    pub is_editable: bool,
}

impl Default for ExcelProperties {
    fn default() -> Self {
        Self {
            is_in_memory: true,
            is_editable: true,
        }
    }
}

impl ExcelProperties {
    pub fn new(is_in_memory: bool, is_editable: bool) -> Self {
        Self {
            is_in_memory,
            is_editable,
        }
    }

    /// Parse properties from JSON. Missing keys keep their defaults.
    ///
    /// ```
    /// use openxml_office::ExcelProperties;
    ///
    /// let props = ExcelProperties::from_json(r#"{"is_editable": false}"#).unwrap();
    /// assert!(props.is_in_memory);
    /// assert!(!props.is_editable);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as a finished FlatBuffers buffer.
    ///
    /// The output depends only on the two flags.
    pub fn encode(&self) -> Vec<u8> {
        let mut fbb = FlatBufferBuilder::with_capacity(64);
        let start = fbb.start_table();
        fbb.push_slot::<bool>(VT_IS_EDITABLE, self.is_editable, false);
        fbb.push_slot::<bool>(VT_IS_IN_MEMORY, self.is_in_memory, false);
        let root = fbb.end_table(start);
        fbb.finish(root, Some(PROPERTIES_IDENTIFIER));
        fbb.finished_data().to_vec()
    }

    /// Verify and read a buffer produced by [`ExcelProperties::encode`] or any
    /// other writer of the `ExcelPropertiesModel` schema.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        // root offset + identifier
        if buf.len() < 8 || !flatbuffers::buffer_has_identifier(buf, PROPERTIES_IDENTIFIER, false) {
            return Err(OfficeError::Config(format!(
                "missing `{PROPERTIES_IDENTIFIER}` file identifier"
            )));
        }
        let model = flatbuffers::root::<PropertiesModel>(buf)?;
        Ok(Self {
            is_in_memory: model.is_in_memory(),
            is_editable: model.is_editable(),
        })
    }
}

/// Read-side view of the `ExcelPropertiesModel` table.
struct PropertiesModel<'a> {
    table: Table<'a>,
}

impl<'a> Follow<'a> for PropertiesModel<'a> {
    type Inner = PropertiesModel<'a>;

    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            table: unsafe { Table::new(buf, loc) },
        }
    }
}

impl PropertiesModel<'_> {
    fn is_in_memory(&self) -> bool {
        // Verified by `root` before any accessor runs.
        unsafe { self.table.get::<bool>(VT_IS_IN_MEMORY, Some(false)) }.unwrap_or(false)
    }

    fn is_editable(&self) -> bool {
        unsafe { self.table.get::<bool>(VT_IS_EDITABLE, Some(false)) }.unwrap_or(false)
    }
}

impl Verifiable for PropertiesModel<'_> {
    fn run_verifier(
        v: &mut Verifier,
        pos: usize,
    ) -> std::result::Result<(), flatbuffers::InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<bool>("is_in_memory", VT_IS_IN_MEMORY, false)?
            .visit_field::<bool>("is_editable", VT_IS_EDITABLE, false)?
            .finish();
        Ok(())
    }
}
