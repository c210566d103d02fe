//! `pathboard`: inspect and route stored graphs from the terminal.
//!
//! Talks to the same solver and graph store as the browser editor, runs the
//! editor headless, and can export what the canvas would show as SVG.

mod table;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pb_client::{ClientConfig, HttpBackend, PathQueryClient, Persistence};
use pb_core::id::NodeId;
use pb_core::layout::Viewport;
use pb_core::model::GraphModel;
use pb_core::protocol::{GraphDocument, GraphKey};
use pb_editor::Editor;
use pb_render::{Theme, render_svg};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "pathboard",
    version,
    about = "List, inspect and route graphs stored on a Pathboard server."
)]
struct Cli {
    /// Base URL of the solver/graph-store API (overrides PATHBOARD_API_URL).
    #[arg(long = "api-url", global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides PATHBOARD_TIMEOUT_SECS).
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Use the dark theme for SVG output.
    #[arg(long, global = true)]
    dark: bool,

    /// Canvas container width used for layout.
    #[arg(long, global = true, default_value_t = 800.0)]
    width: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List stored graphs.
    List,
    /// Print a stored graph's nodes and edges.
    Show {
        id: String,
        /// Also write the drawing to this SVG file.
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Ask the solver for the shortest route through a stored graph.
    Route {
        id: String,
        /// Start node id (defaults to the lowest numbered node).
        #[arg(long)]
        from: Option<String>,
        /// End node id (defaults to the highest numbered node).
        #[arg(long)]
        to: Option<String>,
        /// Print the solver's iteration table.
        #[arg(long)]
        iterations: bool,
        /// Also write the drawing, route highlighted, to this SVG file.
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Save a `{ nodes, edges }` JSON file to the store.
    Save {
        file: PathBuf,
        #[arg(long, default_value = "")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ClientConfig::default();
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Some(Duration::from_secs(secs)));
    }
    log::debug!("using API at {}", config.base_url);
    let backend = HttpBackend::new(config).context("failed to set up HTTP client")?;
    let theme = if cli.dark { Theme::dark() } else { Theme::light() };
    let viewport = Viewport {
        width: cli.width,
        ..Viewport::default()
    };

    match cli.command {
        Command::List => {
            let mut persistence = Persistence::new(backend);
            let graphs = persistence.list().await;
            if graphs.is_empty() {
                println!("No graphs stored.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = graphs
                .iter()
                .map(|g| {
                    vec![
                        g.id.to_string(),
                        g.name.clone(),
                        g.created_at.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            print!("{}", table::render(&["id", "name", "created"], &rows));
        }
        Command::Show { id, svg } => {
            let persistence = Persistence::new(backend);
            let editor = load_editor(&persistence, &id, viewport).await?;
            println!("Nodes");
            print!("{}", table::nodes(&editor.node_rows()));
            println!("\nEdges");
            print!("{}", table::edges(&editor.edge_rows()));
            if let Some(path) = svg {
                write_svg(&editor, &theme, &path)?;
            }
        }
        Command::Route {
            id,
            from,
            to,
            iterations,
            svg,
        } => {
            let persistence = Persistence::new(backend);
            let mut editor = load_editor(&persistence, &id, viewport).await?;
            if let Some(from) = from {
                if !editor.set_start(NodeId::intern(&from)) {
                    bail!("graph {id} has no node {from:?}");
                }
            }
            if let Some(to) = to {
                if !editor.set_end(NodeId::intern(&to)) {
                    bail!("graph {id} has no node {to:?}");
                }
            }
            let Some(query) = editor.query_request() else {
                bail!("graph {id} is empty; nothing to route");
            };

            let solver = PathQueryClient::new(persistence.store().clone());
            let result = solver.run(&query).await;
            let report = editor.apply_query_result(result).clone();
            println!("{}", report.summary());
            if iterations {
                if report.iterations.is_empty() {
                    println!("{}", pb_editor::report::NO_ITERATIONS);
                } else {
                    print!("\n{}", table::iterations(&report.iterations));
                }
            }
            if let Some(path) = svg {
                write_svg(&editor, &theme, &path)?;
            }
        }
        Command::Save { file, name } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let graph = prepare_upload(&text, viewport)
                .with_context(|| format!("{} is not a graph document", file.display()))?;

            let mut persistence = Persistence::new(backend);
            if !persistence.save(&name, graph).await {
                bail!("the graph store rejected the save");
            }
            println!("Saved. {} graphs stored.", persistence.graphs().len());
        }
    }
    Ok(())
}

/// Parse a graph file and clean it up the way a load would, without fitting
/// it to a canvas. Coordinates change only when the circular fallback runs.
fn prepare_upload(text: &str, viewport: Viewport) -> Result<GraphDocument> {
    let doc: GraphDocument = serde_json::from_str(text)?;
    let mut model = GraphModel::new();
    let loaded = model.load_from(doc, viewport);
    if loaded.dropped_nodes + loaded.dropped_edges > 0 {
        log::warn!(
            "dropped {} duplicate nodes and {} invalid edges",
            loaded.dropped_nodes,
            loaded.dropped_edges
        );
    }
    if loaded.fallback_layout {
        log::info!("file has nodes without coordinates; laid out on a circle");
    }
    Ok(model.to_document())
}

async fn load_editor(
    persistence: &Persistence<HttpBackend>,
    id: &str,
    viewport: Viewport,
) -> Result<Editor> {
    let Some(doc) = persistence.load(&GraphKey::from(id)).await else {
        bail!("graph {id} could not be loaded");
    };
    let mut editor = Editor::new(viewport);
    let loaded = editor.load(doc);
    if loaded.fallback_layout {
        log::info!("graph {id} has no coordinates; laid out on a circle");
    }
    Ok(editor)
}

fn write_svg(editor: &Editor, theme: &Theme, path: &Path) -> Result<()> {
    let svg = render_svg(&editor.scene(), editor.canvas(), theme);
    std::fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
