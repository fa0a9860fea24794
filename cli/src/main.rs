//! Mindgraph CLI: edit mind-map documents from the command line
//!
//! Every subcommand opens a document, applies one editor command and saves
//! it again. `shell` keeps a document open and reads commands line by line.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use mindgraph::{Color, Command, Editor, EditorConfig, Feedback, Mode, NodeId, Scope};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "mindgraph", version, about = "Mind-map editor CLI")]
struct Cli {
    /// Editor settings file (YAML)
    #[arg(long, global = true, env = "MINDGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log every graph mutation to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a document holding only the root node
    New {
        path: PathBuf,
        /// Content of the root node
        #[arg(long)]
        content: Option<String>,
    },
    /// List the nodes and edges of a document
    Show { path: PathBuf },
    /// Add a child under a node
    Insert {
        path: PathBuf,
        /// Number of the parent node
        #[arg(long, default_value_t = 0)]
        parent: usize,
        /// Content of the new node
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Delete a node, or its subtree with --subtree
    Delete {
        path: PathBuf,
        node: usize,
        #[arg(long)]
        subtree: bool,
    },
    /// Add an edge between two nodes
    Link { path: PathBuf, from: usize, to: usize },
    /// Remove the edge between two nodes
    Unlink { path: PathBuf, from: usize, to: usize },
    /// Grow a node one step, or shrink it with --down
    Scale {
        path: PathBuf,
        node: usize,
        #[arg(long)]
        down: bool,
        #[arg(long)]
        subtree: bool,
    },
    /// Set the fill color of a node (#rrggbb)
    Color {
        path: PathBuf,
        node: usize,
        color: String,
        #[arg(long)]
        subtree: bool,
    },
    /// Set the text color of a node (#rrggbb)
    TextColor {
        path: PathBuf,
        node: usize,
        color: String,
        #[arg(long)]
        subtree: bool,
    },
    /// Move a node by an offset
    Move {
        path: PathBuf,
        node: usize,
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
        #[arg(long)]
        subtree: bool,
    },
    /// List the numbers of a node's subtree
    Subtree { path: PathBuf, node: usize },
    /// Report structural problems in a document
    Check { path: PathBuf },
    /// Start an interactive editing session
    Shell {
        /// Document to open; created on first save if it doesn't exist
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let result = load_config(cli.config.as_deref()).and_then(|config| run(cli.command, config, &cli.format));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> CliResult<EditorConfig> {
    Ok(match path {
        Some(path) => EditorConfig::from_yaml_file(path)?,
        None => EditorConfig::default(),
    })
}

fn run(command: Commands, config: EditorConfig, format: &OutputFormat) -> CliResult<()> {
    match command {
        Commands::New { path, content } => {
            let config = match content {
                Some(root_content) => EditorConfig { root_content, ..config },
                None => config,
            };
            let mut editor = Editor::new(config);
            editor.save(&path)?;
            println!("Created {}", path.display());
            Ok(())
        }
        Commands::Show { path } => {
            let editor = Editor::open_file(&path, config)?;
            print_map(&editor, format)
        }
        Commands::Insert { path, parent, content } => edit(&path, config, |editor| {
            select(editor, parent)?;
            editor.execute(Command::InsertChild)?;
            editor.execute(Command::SetContent(content))?;
            let child = editor.store().active_node().and_then(|id| editor.store().index_of(id));
            if let Some(index) = child {
                println!("Inserted node #{}", index);
            }
            Ok(())
        }),
        Commands::Delete { path, node, subtree } => edit(&path, config, |editor| {
            select(editor, node)?;
            report(editor.execute(Command::DeleteNode(scope(subtree)))?);
            Ok(())
        }),
        Commands::Link { path, from, to } => edit(&path, config, |editor| {
            select(editor, from)?;
            editor.execute(Command::EnterEdgeAddMode)?;
            let target = node_at(editor, to)?;
            report(editor.execute(Command::Select(target))?);
            Ok(())
        }),
        Commands::Unlink { path, from, to } => edit(&path, config, |editor| {
            select(editor, from)?;
            editor.execute(Command::EnterEdgeDeleteMode)?;
            let other = node_at(editor, to)?;
            report(editor.execute(Command::Select(other))?);
            Ok(())
        }),
        Commands::Scale { path, node, down, subtree } => edit(&path, config, |editor| {
            select(editor, node)?;
            let command = if down {
                Command::ScaleDown(scope(subtree))
            } else {
                Command::ScaleUp(scope(subtree))
            };
            editor.execute(command)?;
            Ok(())
        }),
        Commands::Color { path, node, color, subtree } => edit(&path, config, |editor| {
            select(editor, node)?;
            editor.execute(Command::SetColor(scope(subtree), parse_color(&color)?))?;
            Ok(())
        }),
        Commands::TextColor { path, node, color, subtree } => edit(&path, config, |editor| {
            select(editor, node)?;
            editor.execute(Command::SetTextColor(scope(subtree), parse_color(&color)?))?;
            Ok(())
        }),
        Commands::Move { path, node, dx, dy, subtree } => edit(&path, config, |editor| {
            select(editor, node)?;
            editor.execute(Command::Move { scope: scope(subtree), dx, dy })?;
            Ok(())
        }),
        Commands::Subtree { path, node } => {
            let editor = Editor::open_file(&path, config)?;
            let store = editor.store();
            let indices: Vec<usize> = store
                .subtree(node_at(&editor, node)?)
                .into_iter()
                .filter_map(|id| store.index_of(id))
                .collect();

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&indices)?),
                OutputFormat::Table => {
                    let line: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
                    println!("{}", line.join(" "));
                }
            }
            Ok(())
        }
        Commands::Check { path } => {
            let editor = Editor::open_file(&path, config)?;
            let problems: Vec<String> = editor.check().iter().map(|v| v.to_string()).collect();

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&problems)?),
                OutputFormat::Table if problems.is_empty() => println!("No problems found"),
                OutputFormat::Table => {
                    for problem in &problems {
                        println!("{}", problem);
                    }
                }
            }

            if problems.is_empty() {
                Ok(())
            } else {
                Err(format!("{} problem(s) found", problems.len()).into())
            }
        }
        Commands::Shell { path } => run_shell(path, config, format),
    }
}

/// Open `path`, apply `change` and save it back
fn edit(
    path: &Path,
    config: EditorConfig,
    change: impl FnOnce(&mut Editor) -> CliResult<()>,
) -> CliResult<()> {
    let mut editor = Editor::open_file(path, config)?;
    change(&mut editor)?;
    editor.save_current()?;
    Ok(())
}

fn scope(subtree: bool) -> Scope {
    if subtree {
        Scope::Subtree
    } else {
        Scope::Node
    }
}

fn node_at(editor: &Editor, index: usize) -> CliResult<NodeId> {
    editor
        .store()
        .node_at(index)
        .ok_or_else(|| format!("No node #{} (the map has {} nodes)", index, editor.store().node_count()).into())
}

fn select(editor: &mut Editor, index: usize) -> CliResult<()> {
    let node = node_at(editor, index)?;
    editor.execute(Command::Select(node))?;
    Ok(())
}

fn parse_color(text: &str) -> CliResult<Color> {
    Color::from_hex(text).ok_or_else(|| format!("'{}' is not a #rrggbb color", text).into())
}

fn report(feedback: Feedback) {
    if feedback.message.is_some() {
        println!("{}", feedback);
    }
}

fn print_map(editor: &Editor, format: &OutputFormat) -> CliResult<()> {
    let store = editor.store();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&mindgraph::persistence::save(store))?);
        }
        OutputFormat::Table => {
            let mut nodes = Table::new();
            nodes.set_content_arrangement(ContentArrangement::Dynamic);
            nodes.set_header(vec!["#", "content", "x", "y", "scale", "color", "text", ""]);

            for (index, node) in store.nodes().enumerate() {
                let marker = if store.is_active(node.id) { "*" } else { "" };
                nodes.add_row(vec![
                    index.to_string(),
                    node.content.clone(),
                    format!("{:.1}", node.position.x),
                    format!("{:.1}", node.position.y),
                    format!("{:.2}", node.scale),
                    node.color.to_string(),
                    node.text_color.to_string(),
                    marker.to_string(),
                ]);
            }
            println!("{}", nodes);

            if store.edge_count() > 0 {
                let mut edges = Table::new();
                edges.set_content_arrangement(ContentArrangement::Dynamic);
                edges.set_header(vec!["source", "destination", "color", "width", "kind"]);

                for edge in store.all_edges() {
                    let index = |id| store.index_of(id).map(|i| i.to_string()).unwrap_or_default();
                    edges.add_row(vec![
                        index(edge.source),
                        index(edge.target),
                        edge.color.to_string(),
                        format!("{}", edge.width),
                        if edge.secondary { "secondary" } else { "primary" }.to_string(),
                    ]);
                }
                println!("{}", edges);
            }

            println!("{} node(s), {} edge(s)", store.node_count(), store.edge_count());
        }
    }

    Ok(())
}

fn run_shell(path: Option<PathBuf>, config: EditorConfig, format: &OutputFormat) -> CliResult<()> {
    let mut editor = match &path {
        Some(path) if path.exists() => Editor::open_file(path, config)?,
        _ => Editor::new(config),
    };
    let target = path;

    println!("Mindgraph Interactive Shell");
    println!("Type :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("{}> ", prompt(&editor));

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&first, rest)) = words.split_first() else {
            continue;
        };

        match first {
            ":quit" | ":exit" | ":q" => break,
            ":help" | ":h" => print_help(),
            "show" => {
                if let Err(e) = print_map(&editor, format) {
                    eprintln!("Error: {}", e);
                }
            }
            "save" => {
                let result = match (rest.first(), &target) {
                    (Some(path), _) => editor.save(path),
                    (None, Some(path)) if editor.path().is_none() => editor.save(path),
                    (None, _) => editor.save_current(),
                };
                match result {
                    Ok(feedback) => report(feedback),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            word => match shell_commands(&editor, word, rest) {
                Ok(commands) => {
                    for command in commands {
                        match editor.execute(command) {
                            Ok(feedback) => report(feedback),
                            Err(e) => {
                                eprintln!("Error: {}", e);
                                break;
                            }
                        }
                    }
                    print_hints(&editor);
                }
                Err(e) => eprintln!("Error: {}", e),
            },
        }
    }

    if editor.is_modified() {
        eprintln!("Unsaved changes discarded");
    }
    println!("Bye!");
    Ok(())
}

/// Translate one shell line into editor commands
fn shell_commands(editor: &Editor, word: &str, args: &[&str]) -> CliResult<Vec<Command>> {
    let subtree = args.contains(&"subtree");
    let step = editor.config().move_step;

    let commands = match word {
        "new" => vec![Command::NewDocument],
        "open" => {
            let path = args.first().ok_or("usage: open <path>")?;
            vec![Command::Open(PathBuf::from(*path))]
        }
        "insert" => vec![Command::InsertChild],
        "edit" => vec![Command::EditNode],
        "text" => vec![Command::SetContent(args.join(" "))],
        "picture" => {
            let path = args.first().ok_or("usage: picture <path>")?;
            vec![Command::InsertPicture(path.to_string())]
        }
        "delete" => vec![Command::DeleteNode(scope(subtree))],
        "add-edge" => vec![Command::EnterEdgeAddMode],
        "del-edge" => vec![Command::EnterEdgeDeleteMode],
        "select" => {
            let index = args
                .first()
                .ok_or("usage: select <number>")?
                .parse::<usize>()?;
            vec![Command::Select(node_at(editor, index)?)]
        }
        "f" => vec![Command::HintToggle],
        "back" => vec![Command::HintBackspace],
        "enter" => vec![Command::HintConfirm],
        "esc" => vec![Command::Cancel],
        "+" | "scale-up" => vec![Command::ScaleUp(scope(subtree))],
        "-" | "scale-down" => vec![Command::ScaleDown(scope(subtree))],
        "up" => vec![Command::Move { scope: scope(subtree), dx: 0.0, dy: -step }],
        "down" => vec![Command::Move { scope: scope(subtree), dx: 0.0, dy: step }],
        "left" => vec![Command::Move { scope: scope(subtree), dx: -step, dy: 0.0 }],
        "right" => vec![Command::Move { scope: scope(subtree), dx: step, dy: 0.0 }],
        "move" => match args {
            [dx, dy, ..] => vec![Command::Move {
                scope: scope(subtree),
                dx: dx.parse()?,
                dy: dy.parse()?,
            }],
            _ => return Err("usage: move <dx> <dy> [subtree]".into()),
        },
        "color" => {
            let color = parse_color(args.first().ok_or("usage: color #rrggbb [subtree]")?)?;
            vec![Command::SetColor(scope(subtree), color)]
        }
        "text-color" => {
            let color = parse_color(args.first().ok_or("usage: text-color #rrggbb [subtree]")?)?;
            vec![Command::SetTextColor(scope(subtree), color)]
        }
        digits if digits.bytes().all(|b| b.is_ascii_digit()) => digits
            .bytes()
            .map(|b| Command::HintDigit(b - b'0'))
            .collect(),
        other => return Err(format!("unknown command '{}', try :help", other).into()),
    };

    Ok(commands)
}

fn prompt(editor: &Editor) -> String {
    let mode = match editor.mode() {
        Mode::Normal => "",
        Mode::AddingEdge => "[add-edge]",
        Mode::DeletingEdge => "[del-edge]",
        Mode::EditingNode => "[edit]",
    };
    let dirty = if editor.is_modified() { "*" } else { "" };
    format!("mindgraph{}{}", mode, dirty)
}

fn print_hints(editor: &Editor) {
    let hint = editor.hint();
    if !hint.is_active() {
        return;
    }

    let labels: Vec<String> = hint.candidates().iter().map(|i| i.to_string()).collect();
    match hint.best_candidate() {
        Some(best) => println!("hints [{}]: {} (enter: {})", hint.buffer(), labels.join(" "), best),
        None => println!("hints [{}]: {}", hint.buffer(), labels.join(" ")),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  insert / edit / text <content>   Add a child / edit / set content");
    println!("  picture <path>                   Append an image to the content");
    println!("  delete [subtree]                 Delete the active node");
    println!("  add-edge / del-edge              Then select the other node");
    println!("  select <n>                       Select node number n");
    println!("  f, <digits>, back, enter         Hint mode");
    println!("  up/down/left/right [subtree]     Move by one step");
    println!("  move <dx> <dy> [subtree]         Move by an offset");
    println!("  + / - [subtree]                  Scale up / down");
    println!("  color / text-color #rrggbb       Set colors");
    println!("  esc                              Cancel the current mode");
    println!("  new / open <path> / save [path]  Documents");
    println!("  show                             List nodes and edges");
    println!("  :quit                            Exit shell");
}
