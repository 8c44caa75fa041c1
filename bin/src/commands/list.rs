use sistrum_core::{Action, SessionConfig};

pub fn run(config: &SessionConfig) -> Result<(), Box<dyn std::error::Error>> {
    for (id, description) in Action::registry(&config.namespace) {
        println!("{id:<28} {description}");
    }
    Ok(())
}
