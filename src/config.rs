use std::fmt;

use clap::Parser;

use crate::app::SceneKind;
use crate::error::{TableauError, TableauResult};

/// Carpets deeper than this produce more squares than are worth drawing.
pub const LEVEL_LIMIT: u32 = 7;

/// User defined configuration settings.
#[derive(Clone, Debug, Parser)]
#[command(name = "tableau", version, about = "A house, a waving arm and a Sierpinski carpet")]
pub struct Config {
    /// Initial window width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 640)]
    pub height: u32,

    /// Scene shown at startup
    #[arg(long, value_enum, default_value_t = SceneKind::Street)]
    pub scene: SceneKind,

    /// Recursion depth of the carpet
    #[arg(long, default_value_t = 3)]
    pub levels: u32,

    /// Deepest carpet the keyboard may select
    #[arg(long, default_value_t = 6)]
    pub max_levels: u32,

    /// Bend of the house tree's first branch, in degrees
    #[arg(long, default_value_t = -30.0, allow_hyphen_values = true)]
    pub tree_angle1: f32,

    /// Bend of the house tree's second branch, in degrees
    #[arg(long, default_value_t = -30.0, allow_hyphen_values = true)]
    pub tree_angle2: f32,

    /// Animation steps per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Start with the arm animation stopped
    #[arg(long)]
    pub paused: bool,
}
impl Config {
    pub fn validate(&self) -> TableauResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TableauError::InvalidConfig(
                format!("window size {}x{} must be non-zero", self.width, self.height)
            ));
        }
        if self.fps == 0 {
            return Err(TableauError::InvalidConfig(String::from("fps must be non-zero")));
        }
        if self.max_levels > LEVEL_LIMIT {
            return Err(TableauError::InvalidConfig(
                format!("max levels {} exceeds {LEVEL_LIMIT}", self.max_levels)
            ));
        }
        if self.levels > self.max_levels {
            return Err(TableauError::InvalidConfig(
                format!("levels {} exceeds max levels {}", self.levels, self.max_levels)
            ));
        }
        Ok(())
    }
}
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "
            \rTableau
            \r=============================================================
            \rWindow: {}x{}
            \rScene: {:?}
            \rCarpet Levels: {} (max {})
            \rTree Angles: {}, {}
            \rSteps Per Second: {}{}",
            self.width,
            self.height,
            self.scene,
            self.levels,
            self.max_levels,
            self.tree_angle1,
            self.tree_angle2,
            self.fps,
            if self.paused { " (paused)" } else { "" },
        )
    }
}
impl Default for Config {
    fn default() -> Self {
        Self {
            width:       800,
            height:      640,
            scene:       SceneKind::Street,
            levels:      3,
            max_levels:  6,
            tree_angle1: -30.0,
            tree_angle2: -30.0,
            fps:         60,
            paused:      false,
        }
    }
}

#[test]
fn defaults_match_parser() {
    let parsed = Config::try_parse_from(["tableau"]).unwrap();
    let default = Config::default();
    assert!(parsed.width == default.width && parsed.height == default.height);
    assert!(parsed.scene == default.scene);
    assert!(parsed.levels == default.levels && parsed.max_levels == default.max_levels);
    assert!(parsed.tree_angle1 == default.tree_angle1);
    assert!(parsed.fps == default.fps && !parsed.paused);
}

#[test]
fn parses_flags() {
    let cfg = Config::try_parse_from([
        "tableau", "--scene", "recursive", "--levels", "5", "--tree-angle1", "-45", "--paused",
    ]).unwrap();
    assert!(cfg.scene == SceneKind::Recursive);
    assert!(cfg.levels == 5);
    assert!(cfg.tree_angle1 == -45.0);
    assert!(cfg.paused);
    assert!(cfg.validate().is_ok());
}

#[test]
fn rejects_bad_values() {
    let too_deep = Config { levels: 7, max_levels: 6, ..Config::default() };
    assert!(matches!(too_deep.validate(), Err(TableauError::InvalidConfig(_))));

    let no_fps = Config { fps: 0, ..Config::default() };
    assert!(no_fps.validate().is_err());

    let flat = Config { height: 0, ..Config::default() };
    assert!(flat.validate().is_err());

    let limit = Config { max_levels: LEVEL_LIMIT + 1, ..Config::default() };
    assert!(limit.validate().is_err());
}
