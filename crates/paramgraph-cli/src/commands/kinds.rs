//! List declared parameter kinds

use paramgraph_core::DeclaredKind;

pub fn run() -> anyhow::Result<()> {
    println!("{:<14}{:<14}{:<10}DEFAULT", "KIND", "CORE", "RANGE");
    for kind in DeclaredKind::ALL {
        let core = kind.core_kind();
        let range = match kind.fixed_range() {
            Some((min, max)) => format!("[{}, {}]", min, max),
            None => "-".to_string(),
        };
        println!(
            "{:<14}{:<14}{:<10}{}",
            kind.as_str(),
            core.as_str(),
            range,
            core.default_value()
        );
    }
    Ok(())
}
