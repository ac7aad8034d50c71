use std::error::Error;
use std::fmt;
use std::fmt::Write;

use itertools::iproduct;
use log::debug;

use crate::cells::SquareSide;
use crate::grid_traits::MazeGrid;
use crate::squaregrid::SquareGrid;

/// Physical sizes used when turning a maze into solid geometry, all in millimetres.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct RenderSettings {
    /// Side length of one cell's square block.
    pub block_size: f32,
    /// Thickness of the slab the maze is cut from.
    pub block_depth: f32,
    /// Radius of the ball, and of the channels it rolls along.
    pub ball_radius: f32,
    /// Height of the ball's centre above the bottom of the slab.
    pub ball_depth: f32,
}

impl Default for RenderSettings {
    fn default() -> RenderSettings {
        RenderSettings {
            block_size: 10.0,
            block_depth: 10.0,
            ball_radius: 4.9,
            ball_depth: 5.2,
        }
    }
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub enum RenderSettingError {
    NotPositive { setting: &'static str, value: f32 },
}

impl fmt::Display for RenderSettingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RenderSettingError::NotPositive { setting, value } => {
                write!(f, "{} must be a positive number, not {}", setting, value)
            }
        }
    }
}

impl Error for RenderSettingError {}

impl RenderSettings {
    pub fn check(&self) -> Result<(), RenderSettingError> {
        let settings = [("block size", self.block_size),
                        ("block depth", self.block_depth),
                        ("ball radius", self.ball_radius),
                        ("ball depth", self.ball_depth)];
        for &(setting, value) in &settings {
            if !(value.is_finite() && value > 0.0) {
                return Err(RenderSettingError::NotPositive { setting, value });
            }
        }
        Ok(())
    }
}

/// Render the maze as an OpenSCAD script.
///
/// The maze is a slab `width * block_size` by `height * block_size` with a ball shaped hollow in the middle of
/// every cell. Each open wall becomes a cylinder joining two hollows. Only the right and down walls of a cell are
/// drawn as cylinders, so every open wall is cut once, from its left or upper cell.
pub fn render_scad(grid: &SquareGrid, settings: &RenderSettings) -> String {
    let mut scad = String::new();
    // Writing into a String cannot fail
    let _ = write_scad(&mut scad, grid, settings);
    debug!("rendered {} by {} maze as {} bytes of OpenSCAD",
           grid.width(),
           grid.height(),
           scad.len());
    scad
}

fn write_scad<W: Write>(out: &mut W,
                        grid: &SquareGrid,
                        settings: &RenderSettings)
                        -> fmt::Result {

    writeln!(out, "// Global resolution")?;
    writeln!(out, "$fs = 0.1;  // Don't generate smaller facets than 0.1 mm")?;
    writeln!(out, "$fa = 10;    // Don't generate larger angles than 5 degrees")?;
    writeln!(out)?;

    writeln!(out, "mazeWidth = {};", grid.width())?;
    writeln!(out, "mazeHeight = {};", grid.height())?;
    writeln!(out, "blockSize = {:.6};", settings.block_size)?;
    writeln!(out, "blockDepth = {:.6};", settings.block_depth)?;
    writeln!(out, "ballRadius = {:.6};", settings.ball_radius)?;
    writeln!(out, "ballDepth = {:.6};", settings.ball_depth)?;
    writeln!(out)?;

    writeln!(out,
             "module maze() color(\"red\") linear_extrude(height = blockDepth) \
              square([mazeWidth * blockSize, mazeHeight*blockSize]);")?;
    writeln!(out)?;
    writeln!(out, "module ball() color(\"green\") sphere(ballRadius);")?;
    writeln!(out)?;
    writeln!(out,
             "module hcylinder() color(\"green\") rotate([0, 90, 0]) \
              cylinder(h = blockSize, r = ballRadius);")?;
    writeln!(out)?;
    writeln!(out,
             "module vcylinder() color(\"green\") rotate([-90, 0, 0]) \
              cylinder(h = blockSize, r = ballRadius);")?;
    writeln!(out)?;

    writeln!(out, "translate([mazeWidth * blockSize / -2, mazeHeight * blockSize / -2, 0]) {{")?;
    writeln!(out, "  difference() {{")?;
    writeln!(out, "    maze();")?;
    writeln!(out, "    union() {{")?;

    for (y, x) in iproduct!(0..grid.height(), 0..grid.width()) {
        writeln!(out,
                 "      translate([({} + 0.5) * blockSize, ({} + 0.5) * blockSize, ballDepth]) {{",
                 x,
                 y)?;
        writeln!(out, "        ball();")?;

        if let Some(cell) = grid.cells().get(y * grid.width() + x) {
            if cell.is_open(SquareSide::Right.index()) {
                writeln!(out, "        hcylinder();")?;
            }
            if cell.is_open(SquareSide::Down.index()) {
                writeln!(out, "        vcylinder();")?;
            }
        }
        writeln!(out, "      }}")?;
    }

    writeln!(out, "    }}")?;
    writeln!(out, "  }}")?;
    writeln!(out, "}}")
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::{WallSide, WallState};
    use crate::units::{ColumnLength, RowLength};

    fn grid(w: usize, h: usize) -> SquareGrid {
        SquareGrid::new(RowLength(w), ColumnLength(h)).expect("small grid dimensions")
    }

    #[test]
    fn default_settings_are_valid() {
        assert_eq!(RenderSettings::default().check(), Ok(()));
    }

    #[test]
    fn non_positive_settings_are_rejected() {
        let settings = RenderSettings { ball_radius: 0.0, ..RenderSettings::default() };
        assert_eq!(settings.check(),
                   Err(RenderSettingError::NotPositive { setting: "ball radius", value: 0.0 }));

        let settings = RenderSettings { block_size: -1.0, ..RenderSettings::default() };
        assert!(settings.check().is_err());

        let settings = RenderSettings { block_depth: ::std::f32::NAN, ..RenderSettings::default() };
        assert!(settings.check().is_err());
    }

    #[test]
    fn parameters_are_declared() {
        let scad = render_scad(&grid(3, 2), &RenderSettings::default());
        assert!(scad.starts_with("// Global resolution\n\
                                  $fs = 0.1;  // Don't generate smaller facets than 0.1 mm\n\
                                  $fa = 10;    // Don't generate larger angles than 5 degrees\n\n"));
        assert!(scad.contains("mazeWidth = 3;\n"));
        assert!(scad.contains("mazeHeight = 2;\n"));
        assert!(scad.contains("blockSize = 10.000000;\n"));
        assert!(scad.contains("blockDepth = 10.000000;\n"));
        assert!(scad.contains("ballRadius = 4.900000;\n"));
        assert!(scad.contains("ballDepth = 5.200000;\n"));
        assert!(scad.ends_with("    }\n  }\n}\n"));
    }

    #[test]
    fn one_ball_per_cell() {
        let scad = render_scad(&grid(3, 2), &RenderSettings::default());
        assert_eq!(scad.matches("        ball();").count(), 6);
        assert!(scad.contains("translate([(0 + 0.5) * blockSize, (0 + 0.5) * blockSize, ballDepth]) {"));
        assert!(scad.contains("translate([(2 + 0.5) * blockSize, (1 + 0.5) * blockSize, ballDepth]) {"));
        assert_eq!(scad.matches("        hcylinder();").count(), 0);
        assert_eq!(scad.matches("        vcylinder();").count(), 0);
    }

    #[test]
    fn open_walls_are_cut_once_from_the_left_or_upper_cell() {
        let mut g = grid(2, 2);
        g.set_passage(WallSide::new(0, SquareSide::Right as usize), WallState::Open).unwrap();
        g.set_passage(WallSide::new(1, SquareSide::Down as usize), WallState::Open).unwrap();
        g.set_passage(WallSide::new(3, SquareSide::Left as usize), WallState::Open).unwrap();

        let scad = render_scad(&g, &RenderSettings::default());
        assert_eq!(scad.matches("        hcylinder();").count(), 2);
        assert_eq!(scad.matches("        vcylinder();").count(), 1);

        let cell_1 = "      translate([(1 + 0.5) * blockSize, (0 + 0.5) * blockSize, ballDepth]) {\n\
                      \x20       ball();\n\
                      \x20       vcylinder();\n\
                      \x20     }\n";
        assert!(scad.contains(cell_1));
    }
}
