use anyhow::{bail, Context};
use archkit::diagram::serialization;
use archkit::{init_logging, Canvas, DiagramTemplate, BUILD_DATE, VERSION};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("--version") | Some("-V") => {
            println!("archkit {} (built {})", VERSION, BUILD_DATE);
            Ok(())
        }
        Some("templates") => {
            for template in DiagramTemplate::all() {
                println!(
                    "{:<14} {} - {}",
                    template.as_str(),
                    template.display_name(),
                    template.description()
                );
            }
            Ok(())
        }
        Some("template") => {
            let id = args
                .get(1)
                .context("Usage: archkit template <blank|web-service|microservices>")?;
            let Some(template) = DiagramTemplate::parse(id) else {
                bail!("Unknown template: {}", id);
            };
            let json = serialization::to_json(&template.instantiate())?;
            println!("{}", json);
            Ok(())
        }
        Some("info") => {
            let path = args.get(1).context("Usage: archkit info <diagram.json>")?;
            print_info(Path::new(path))
        }
        _ => {
            eprintln!("archkit {} (built {})", VERSION, BUILD_DATE);
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  archkit templates            List starter templates");
            eprintln!("  archkit template <id>        Print a starter template as JSON");
            eprintln!("  archkit info <diagram.json>  Validate a diagram file and summarize it");
            eprintln!("  archkit --version            Print version and build date");
            Ok(())
        }
    }
}

/// Load a diagram file and print a one-screen summary
fn print_info(path: &Path) -> anyhow::Result<()> {
    let diagram = serialization::load_from_file(path)?;
    let canvas = Canvas::with_diagram(diagram);
    let diagram = canvas.diagram();

    println!("{} ({})", diagram.name, diagram.id);
    println!(
        "  {} nodes, {} connections",
        diagram.nodes.len(),
        diagram.connections.len()
    );

    for node in &diagram.nodes {
        let label = node.label.as_deref().unwrap_or("-");
        println!(
            "  node {:<24} {:<6} at ({:.0}, {:.0})  {}",
            node.id,
            node.kind.as_str(),
            node.position.x,
            node.position.y,
            label
        );
    }

    for connection in &diagram.connections {
        println!(
            "  conn {:<24} {} -> {}",
            connection.id, connection.source, connection.target
        );
    }

    if let Some(bounds) = canvas.content_bounds() {
        println!(
            "  content bounds: ({:.0}, {:.0}) {:.0}x{:.0}",
            bounds.x, bounds.y, bounds.width, bounds.height
        );
    }

    Ok(())
}
