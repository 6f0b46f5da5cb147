//! Line-oriented input protocol read from standard input.

use anyhow::{bail, Context, Result};
use maze_chase_core::{Direction, GameConfig, DIFFICULTIES, LAB_SIZES, SPEEDS};

/// A single parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Key(Direction),
    Click { x: i32, y: i32 },
    Cancel,
    NewGame(NewGameRequest),
    Quit,
}

/// Catalog names given to `new`; missing names keep the running game's choice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NewGameRequest {
    difficulty: Option<String>,
    lab_size: Option<String>,
    speed: Option<String>,
}

impl NewGameRequest {
    pub(crate) fn resolve(&self, current: GameConfig) -> Result<GameConfig> {
        let difficulty = match &self.difficulty {
            Some(name) => DIFFICULTIES.find(name)?,
            None => current.difficulty(),
        };
        let lab_size = match &self.lab_size {
            Some(name) => LAB_SIZES.find(name)?,
            None => current.lab_size(),
        };
        let speed = match &self.speed {
            Some(name) => SPEEDS.find(name)?,
            None => current.speed(),
        };
        Ok(GameConfig::new(difficulty, lab_size, speed))
    }
}

/// Parses one line; blank lines yield `None`.
pub(crate) fn parse(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "w" | "up" => Input::Key(Direction::Up),
        "a" | "left" => Input::Key(Direction::Left),
        "s" | "down" => Input::Key(Direction::Down),
        "d" | "right" => Input::Key(Direction::Right),
        "click" => {
            let x = coordinate(words.next(), "x")?;
            let y = coordinate(words.next(), "y")?;
            Input::Click { x, y }
        }
        "cancel" => Input::Cancel,
        "new" => Input::NewGame(NewGameRequest {
            difficulty: words.next().map(str::to_owned),
            lab_size: words.next().map(str::to_owned),
            speed: words.next().map(str::to_owned),
        }),
        "quit" | "q" => Input::Quit,
        other => bail!("unknown command `{other}`"),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected argument `{extra}` after `{command}`");
    }
    Ok(Some(input))
}

fn coordinate(word: Option<&str>, axis: &str) -> Result<i32> {
    let word = word.with_context(|| format!("missing {axis} coordinate for click"))?;
    word.parse()
        .with_context(|| format!("invalid {axis} coordinate `{word}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::Named;

    #[test]
    fn keys_accept_letters_and_words() {
        assert_eq!(parse("w").unwrap(), Some(Input::Key(Direction::Up)));
        assert_eq!(parse("  LEFT ").unwrap(), Some(Input::Key(Direction::Left)));
        assert_eq!(parse("s").unwrap(), Some(Input::Key(Direction::Down)));
        assert_eq!(parse("right").unwrap(), Some(Input::Key(Direction::Right)));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn clicks_carry_pixel_coordinates() {
        assert_eq!(
            parse("click 140 -20").unwrap(),
            Some(Input::Click { x: 140, y: -20 })
        );
        assert_eq!(parse("cancel").unwrap(), Some(Input::Cancel));
    }

    #[test]
    fn malformed_clicks_are_rejected() {
        let missing = parse("click 10").expect_err("missing y");
        assert_eq!(missing.to_string(), "missing y coordinate for click");

        let invalid = parse("click ten 10").expect_err("invalid x");
        assert_eq!(invalid.to_string(), "invalid x coordinate `ten`");

        assert!(parse("click 1 2 3").is_err());
        assert!(parse("jump").is_err());
    }

    #[test]
    fn new_game_keeps_unnamed_choices() {
        let Some(Input::NewGame(request)) = parse("new hard xs").unwrap() else {
            panic!("expected a new game request");
        };
        let current = GameConfig::default();
        let config = request.resolve(current).expect("known names");

        assert_eq!(config.difficulty().name(), "Hard");
        assert_eq!(config.lab_size().name(), "XS");
        assert_eq!(config.speed(), current.speed());
    }

    #[test]
    fn new_game_rejects_unknown_names() {
        let Some(Input::NewGame(request)) = parse("new nightmare").unwrap() else {
            panic!("expected a new game request");
        };
        let error = request
            .resolve(GameConfig::default())
            .expect_err("unknown difficulty");
        assert_eq!(error.to_string(), "unknown difficulty `nightmare`");
    }
}
