use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jungle_map::{MapGenerator, Pathfinder, Point, RandomSeeds, SeedSource, SearchResult};

#[derive(Parser, Debug)]
#[command(name = "jungle_map")]
#[command(about = "Generate a seeded jungle field and query paths over it")]
struct Args {
    /// Width of the field in tiles
    #[arg(short, long, default_value = "20")]
    columns: usize,

    /// Height of the field in tiles
    #[arg(short, long, default_value = "20")]
    rows: usize,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start cell for a query, as "x,y"
    #[arg(long)]
    from: Option<String>,

    /// Goal cell for a path query, as "x,y"
    #[arg(long)]
    to: Option<String>,

    /// Show every cell reachable from --from within this cost
    #[arg(long)]
    area: Option<f32>,

    /// Restrict queries to cardinal moves
    #[arg(long)]
    no_diagonal: bool,

    /// Print the generated field as JSON instead of ASCII
    #[arg(long)]
    json: bool,
}

fn parse_point(text: &str) -> Result<Point> {
    let (x, y) = text
        .split_once(',')
        .with_context(|| format!("expected \"x,y\", got {:?}", text))?;
    let x = x.trim().parse().with_context(|| format!("bad x in {:?}", text))?;
    let y = y.trim().parse().with_context(|| format!("bad y in {:?}", text))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| RandomSeeds.next_seed());
    let mut generator = MapGenerator::new(args.columns, args.rows, seed).context("creating generator")?;
    generator.generate();
    let map = generator.into_map();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&map).context("serializing map")?);
        return Ok(());
    }

    let diagonal = !args.no_diagonal;
    let mut overlay = HashSet::new();
    if let Some(from) = args.from.as_deref() {
        let from = parse_point(from)?;
        if !map.grid.contains(from) {
            bail!("start {} is outside the {}x{} field", from, args.columns, args.rows);
        }
        let pathfinder = Pathfinder::new(&map.grid);

        if let Some(to) = args.to.as_deref() {
            let goal = parse_point(to)?;
            let result = pathfinder.path(from, goal, diagonal);
            report_path(&result, from, goal, &mut overlay);
        } else if let Some(max_cost) = args.area {
            let result = pathfinder.area(from, max_cost, diagonal);
            info!(from = %from, max_cost, cells = result.len(), "area query");
            overlay.extend(result.iter().map(|node| node.coord));
        } else {
            bail!("--from needs either --to or --area");
        }
    }

    println!("seed {} ({}x{})", map.seed, args.columns, args.rows);
    for (y, row) in map.ascii_rows().into_iter().enumerate() {
        let line: String = row
            .chars()
            .enumerate()
            .map(|(x, c)| {
                if overlay.contains(&Point::new(x as i32, y as i32)) {
                    '*'
                } else {
                    c
                }
            })
            .collect();
        println!("{}", line);
    }

    Ok(())
}

fn report_path(result: &SearchResult, from: Point, goal: Point, overlay: &mut HashSet<Point>) {
    match (result.goal(), result.goal_route()) {
        (Some(node), Some(route)) => {
            info!(
                from = %from,
                goal = %goal,
                cost = node.cost,
                steps = node.steps,
                visited = result.len(),
                "path found"
            );
            overlay.extend(route);
        }
        _ => info!(from = %from, goal = %goal, visited = result.len(), "goal unreachable"),
    }
}
