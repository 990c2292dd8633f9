use alba_lexer::{ExtensionConfig, LexerRegistry, highlight, setup};
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let filepath = if args.len() > 1 {
        Path::new(&args[1])
    } else {
        eprintln!("Usage: cargo run --example tokenize <file.al>");
        std::process::exit(1);
    };

    let config = match args.get(2) {
        Some(config_path) => ExtensionConfig::from_path(config_path).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        }),
        None => ExtensionConfig::default(),
    };

    let mut registry = LexerRegistry::new();
    let metadata = setup(&mut registry, &config).unwrap_or_else(|e| {
        eprintln!("Setup failed: {e}");
        std::process::exit(1);
    });
    println!("alba highlighting {}", metadata.version);

    let Some(lexer) = registry.for_path(filepath) else {
        eprintln!("No lexer registered for {}", filepath.display());
        std::process::exit(1);
    };
    let source = fs::read_to_string(filepath).expect("Failed to read file");

    println!("\nTokens:");
    for token in lexer.tokens(&source) {
        println!("{:>6} {:<20} {:?}", token.start, token.kind, token.text);
    }

    println!("\nHighlights:");
    let style = registry.style("alba");
    for h in highlight::highlight(lexer.as_ref(), &source) {
        let attrs = style.as_ref().map(|s| s.style_for(h.kind)).unwrap_or_default();
        println!("{:?} => {:?} {:?}", h.kind, h.range, attrs);
    }
}
