use docopt::Docopt;
use log::info;
use maze_scad::{
    generators,
    passages,
    renderers::{self, RenderSettings},
    squaregrid::SquareGrid,
    units::{ColumnLength, RowLength},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "maze-scad

Utility to generate an OpenSCAD file of a maze.

Usage:
    maze_scad [options]
    maze_scad -h | --help
    maze_scad --version

Options:
    -h --help                Show this screen.
    --version                Show the version.
    -w --width=<w>           Width (in blocks) of the maze [default: 10].
    --height=<h>             Height (in blocks) of the maze [default: 10].
    -s --block-size=<s>      Size of the block of the maze [default: 10].
    -d --block-depth=<d>     Depth of each block of the maze [default: 10].
    -r --ball-radius=<r>     Radius of the ball that runs through the maze [default: 4.9].
    -D --ball-depth=<D>      Depth at which the ball runs through the maze [default: 5.2].
    --seed=<n>               Seed for the random maze layout, the same seed and size always gives the same maze.
    --text-out=<path>        Output file path for a textual rendering of the maze.
    --save-edges=<path>      Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_block_size: f32,
    flag_block_depth: f32,
    flag_ball_radius: f32,
    flag_ball_depth: f32,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_save_edges: String,
}

// Create the Error, ErrorKind, ResultExt, and Result types
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            Io(::std::io::Error);
            Grid(::maze_scad::grid_traits::GridError);
            RenderSetting(::maze_scad::renderers::RenderSettingError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    // Bad arguments print the usage error and exit non-zero, --help and --version exit cleanly
    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.version(Some(env!("CARGO_PKG_VERSION").to_string())).deserialize())
        .unwrap_or_else(|e| e.exit());

    let render_settings = RenderSettings {
        block_size: args.flag_block_size,
        block_depth: args.flag_block_depth,
        ball_radius: args.flag_ball_radius,
        ball_depth: args.flag_ball_depth,
    };
    render_settings.check()?;

    let seed = args.flag_seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("generating a {} by {} maze with seed {}", args.flag_width, args.flag_height, seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut maze_grid = SquareGrid::new(RowLength(args.flag_width), ColumnLength(args.flag_height))?;
    let report = generators::random_kruskal(&mut maze_grid, &mut rng)?;
    info!("opened {} walls after rejecting {} picks", report.unions, report.rejected_picks);

    if !args.flag_text_out.is_empty() {
        write_text_to_file(&maze_grid.to_string(), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_save_edges.is_empty() {
        write_text_to_file(&passages::edge_list(&maze_grid), &args.flag_save_edges)
            .chain_err(|| format!("Failed to write maze graph to text file {}", args.flag_save_edges))?;
    }

    let scad = renderers::render_scad(&maze_grid, &render_settings);
    let stdout = io::stdout();
    stdout.lock().write_all(scad.as_bytes())?;

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
