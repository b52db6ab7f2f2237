//! Shared fixtures for integration tests.

use resource_timeouts::config::{load_config_str, PlanDocument};

/// A document with one type per timeout capability shape.
pub const PLAN: &str = r#"
[resources.disk.timeouts]
delete = "5m"

[resources.vm.timeouts]
create = "10m"
read = "1m"
update = "10m"
delete = "10m"

[resources.dns_record]

[[instances]]
name = "data"
type = "disk"
size_gb = 100

[[instances.timeout]]
delete = "10m"

[[instances]]
name = "web"
type = "vm"

[[instances.timeout]]
default = "30s"
create = "10s"

[[instances]]
name = "www"
type = "dns_record"
"#;

/// Load a document, panicking on any error.
pub fn load(content: &str) -> PlanDocument {
    load_config_str(content).expect("plan document should load")
}
