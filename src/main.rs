//! Robot Path Editor (Kommandozeile).
//!
//! Lädt ein Pfad-Dokument und gibt die Adapter-Werte aller Nodes und
//! Segmente aus, wie sie die Code-Generierung liest.

use anyhow::Context;
use robot_path_editor::{
    Adapter, EditorState, GeometryOptions, PathController, PathIntent, PathModel,
};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Robot Path Editor v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let input = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("Aufruf: robot-path-editor <pfad.json>")?;

    // Optionen aus TOML laden (oder Standardwerte)
    let options = GeometryOptions::load_from_file(&GeometryOptions::config_path());

    let mut state = EditorState::with_options(options);
    let mut controller = PathController::new();
    controller.handle_intent(&mut state, PathIntent::OpenRequested { path: input })?;

    let path = state
        .path
        .as_ref()
        .context("Nach dem Laden ist kein Pfad vorhanden")?;
    print_path(path);
    Ok(())
}

fn print_path(path: &PathModel) {
    println!(
        "{} Nodes, {} Segmente, Länge {:.3} in",
        path.node_count(),
        path.segment_count(),
        path.total_length()
    );

    let nodes = path.node_ids();
    let segments = path.segment_ids();
    for (index, node_id) in nodes.iter().enumerate() {
        if let Some(node) = path.node(*node_id) {
            print_adapter(&node_id.to_string(), node.adapter());
        }
        if let Some(segment) = segments.get(index).and_then(|id| path.segment(*id)) {
            let label = format!(
                "{} ({:?}, {:?})",
                segment.id(),
                segment.kind(),
                segment.direction()
            );
            print_adapter(&label, segment.adapter());
        }
    }
}

fn print_adapter(label: &str, adapter: &Adapter) {
    println!("{label} [{:?}]", adapter.icon());
    for (attribute, value) in adapter.iter() {
        println!("  {:<12} {:>12.3}  {}", attribute.name(), value.code, value.display);
    }
}
