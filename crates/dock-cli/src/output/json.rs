use dock_core::error::DockError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), DockError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
