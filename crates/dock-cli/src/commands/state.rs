use dock_core::error::DockError;
use dock_core::slots::Dashboard;

use super::Context;

pub fn show(ctx: &Context) -> Result<(), DockError> {
    if ctx.state_dir.is_none() {
        eprintln!("No --state-dir given; nothing is persisted.");
        return Ok(());
    }
    let store = ctx.store()?;

    for dashboard in Dashboard::ALL {
        println!("{dashboard}:");
        for key in dashboard.keys() {
            match store.raw(key)? {
                Some(doc) => println!("  {:<28} {} bytes", key, doc.len()),
                None => println!("  {:<28} -", key),
            }
        }
        println!();
    }
    Ok(())
}

pub fn clear(ctx: &Context, dashboard: Option<&str>) -> Result<(), DockError> {
    let mut store = ctx.store()?;
    match dashboard {
        Some(name) => {
            let dashboard: Dashboard = name.parse()?;
            store.clear(dashboard)?;
            println!("Cleared {dashboard} state.");
        }
        None => {
            store.clear_all()?;
            println!("Cleared all dashboard state.");
        }
    }
    Ok(())
}
