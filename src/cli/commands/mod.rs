pub mod entry;
pub mod navigation;
pub mod system;
pub mod text;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(navigation::definitions())
        .chain(entry::definitions())
        .chain(text::definitions())
    {
        registry.register(entry);
    }
}
