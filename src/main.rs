use clap::Parser;
use sheet_packer::render;
use sheet_packer::solver::Solver;
use sheet_packer::types::{Demand, Rect, expand_demands};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "sheet_packer",
    about = "Packs rectangular pieces onto stock sheets"
)]
struct Cli {
    /// Stock sheet dimensions (WxH, e.g. 2440x1220)
    #[arg(long)]
    sheet: String,

    /// Pieces as [LABEL=]WxH[:qty][@group] (e.g. door=700x400:2@wardrobe 300x300)
    #[arg(long, num_args = 1..)]
    pieces: Vec<String>,

    /// Blade kerf width, in sheet units
    #[arg(long, default_value_t = 0.0)]
    kerf: f64,

    /// Maximum number of sheets to open
    #[arg(long, default_value_t = 10)]
    max_sheets: usize,

    /// Show ASCII layout of each sheet
    #[arg(long)]
    layout: bool,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Log strategy and consolidation details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_dimensions(s: &str) -> Result<Rect, String> {
    let Some((w, h)) = s.split_once('x') else {
        return Err(format!("invalid dimensions '{}', expected WxH", s));
    };
    let w = w
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    let h = h
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid height in '{}'", s))?;
    if !(w > 0.0 && h > 0.0) {
        return Err(format!("dimensions must be positive in '{}'", s));
    }
    Ok(Rect::new(w, h))
}

fn parse_piece(s: &str) -> Result<Demand, String> {
    let (rest, group) = match s.rsplit_once('@') {
        Some((rest, group)) => (rest, group.to_string()),
        None => (s, String::new()),
    };
    let (label, rest) = match rest.split_once('=') {
        Some((label, rest)) => (label.to_string(), rest),
        None => (String::new(), rest),
    };
    let (dims, qty) = match rest.split_once(':') {
        Some((dims, qty)) => {
            let qty = qty
                .parse::<u32>()
                .map_err(|_| format!("invalid quantity in '{}'", s))?;
            (dims, qty)
        }
        None => (rest, 1),
    };
    if qty == 0 {
        return Err(format!("quantity must be non-zero in '{}'", s));
    }
    let rect = parse_dimensions(dims)?;
    let label = if label.is_empty() {
        rect.to_string()
    } else {
        label
    };
    Ok(Demand {
        label,
        group,
        color: String::new(),
        rect,
        qty,
    })
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let stock = parse_dimensions(&cli.sheet).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let demands: Vec<Demand> = cli
        .pieces
        .iter()
        .map(|p| parse_piece(p))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let solver = Solver::new(stock, cli.kerf, cli.max_sheets, expand_demands(&demands))
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    let result = solver.solve();

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    for (i, sheet) in result.sheets.iter().enumerate() {
        println!("Sheet {} ({}% waste):", i + 1, sheet.waste_percent);
        for p in &sheet.placements {
            let rot = if p.rotated { " [rotated]" } else { "" };
            let group = if p.piece.group.is_empty() {
                String::new()
            } else {
                format!(" ({})", p.piece.group)
            };
            println!(
                "  {}{} {} @ ({}, {}){}",
                p.piece.label,
                group,
                Rect::new(p.w, p.h),
                p.x,
                p.y,
                rot
            );
        }
        if cli.layout {
            print!("{}", render::render_sheet(stock, &sheet.placements));
        }
        println!();
    }

    if !result.unplaced.is_empty() {
        println!("Unplaced:");
        for u in &result.unplaced {
            println!("  {} {}: {}", u.piece.label, u.piece.rect(), u.reason);
        }
        println!();
    }

    for s in &result.suggestions {
        println!("Hint: {}", s.message);
    }

    println!(
        "Summary: {} sheet{} used, {:.1}% waste",
        result.sheet_count(),
        if result.sheet_count() == 1 { "" } else { "s" },
        result.total_waste_percent(),
    );
}
