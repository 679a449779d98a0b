pub mod workbook;

use crate::error::DockError;
use crate::model::SheetRow;

/// One worksheet of an uploaded workbook, reduced to data rows.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<SheetRow>,
}

/// Trait for spreadsheet reading backends.
pub trait SheetReader: Send + Sync {
    /// Read every worksheet in workbook order.
    fn read_sheets(&self, bytes: &[u8]) -> Result<Vec<Sheet>, DockError>;

    /// Name of this reading backend (for diagnostics).
    fn backend_name(&self) -> &str;

    /// Read only the first worksheet.
    fn read_first_sheet(&self, bytes: &[u8]) -> Result<Sheet, DockError> {
        self.read_sheets(bytes)?
            .into_iter()
            .next()
            .ok_or_else(|| DockError::Workbook("workbook has no worksheets".into()))
    }
}
