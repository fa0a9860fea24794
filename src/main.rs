use mindgraph::{Command, Editor, EditorConfig, Scope};

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    println!("Mindgraph v{}", mindgraph::version());
    println!("==========================================");
    println!();

    demo_build_map();
    println!();
    demo_hint_mode();
}

fn demo_build_map() {
    println!("=== Demo 1: Building a map ===");
    let mut editor = Editor::new(EditorConfig {
        root_content: "Holiday".to_string(),
        ..EditorConfig::default()
    });

    for content in ["Travel", "Packing", "Budget"] {
        if let Some(root) = editor.store().root() {
            run(&mut editor, Command::Select(root));
        }
        run(&mut editor, Command::InsertChild);
        run(&mut editor, Command::SetContent(content.to_string()));
        run(&mut editor, Command::Cancel);
    }

    // Cross-link "Budget" to "Travel"
    if let Some(travel) = editor.store().node_at(1) {
        run(&mut editor, Command::EnterEdgeAddMode);
        run(&mut editor, Command::Select(travel));
    }

    run(&mut editor, Command::ScaleUp(Scope::Subtree));
    print_map(&editor);
}

fn demo_hint_mode() {
    println!("=== Demo 2: Hint mode ===");
    let mut editor = Editor::default();
    let Some(root) = editor.store().root() else {
        return;
    };

    for _ in 0..12 {
        run(&mut editor, Command::Select(root));
        run(&mut editor, Command::InsertChild);
        run(&mut editor, Command::Cancel);
    }

    run(&mut editor, Command::HintToggle);
    run(&mut editor, Command::HintDigit(1));
    println!("After typing 1: candidates {:?}", editor.hint().candidates());
    run(&mut editor, Command::HintDigit(0));

    let selected = editor.store().active_node().and_then(|id| editor.store().index_of(id));
    println!("After typing 0: selected node #{:?}", selected);
}

fn run(editor: &mut Editor, command: Command) {
    match editor.execute(command) {
        Ok(feedback) => {
            if feedback.message.is_some() {
                println!("  {}", feedback);
            }
        }
        Err(e) => println!("  Error: {}", e),
    }
}

fn print_map(editor: &Editor) {
    let store = editor.store();
    for (index, node) in store.nodes().enumerate() {
        println!(
            "  #{:<2} {:<10} at ({:>7.1}, {:>7.1}) scale {:.2}",
            index, node.content, node.position.x, node.position.y, node.scale
        );
    }
    for edge in store.all_edges() {
        let kind = if edge.secondary { "secondary" } else { "primary" };
        println!(
            "  {:?} -> {:?} ({})",
            store.index_of(edge.source),
            store.index_of(edge.target),
            kind
        );
    }
    println!("  Total nodes: {}", store.node_count());
    println!("  Total edges: {}", store.edge_count());
}
