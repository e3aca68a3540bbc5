use anyhow::{Context, Result, bail};
use draw2p_core::Point;
use draw2p_core::codec::DELIMITER;

/// One line typed at the drawing prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Stroke(Vec<Point>),
    Color(String),
    Width(f64),
    Eraser,
    Pen,
    Status,
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
  x,y x,y ...   draw a stroke through the given points
  color <css>   set the pen color (e.g. #ff0000)
  width <n>     set the pen width (1-50)
  eraser | pen  switch tools
  status        show the connection status
  reset         drop the connection and negotiate again
  help | quit";

/// Parses a prompt line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    let Some(word) = line.split_whitespace().next() else {
        return Ok(None);
    };
    let rest = line[word.len()..].trim();

    let command = match word {
        "color" => Command::Color(parse_color(rest)?),
        "width" => Command::Width(
            rest.parse()
                .with_context(|| format!("invalid width {rest:?}"))?,
        ),
        "eraser" => Command::Eraser,
        "pen" => Command::Pen,
        "status" => Command::Status,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Stroke(parse_points(line)?),
    };
    Ok(Some(command))
}

/// Colors travel inside a comma-delimited message, so they may not contain
/// the delimiter.
pub fn parse_color(value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        bail!("color needs a value");
    }
    if value.contains(DELIMITER) {
        bail!("color may not contain {DELIMITER:?}");
    }
    Ok(value.to_owned())
}

fn parse_points(line: &str) -> Result<Vec<Point>> {
    line.split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("expected x,y but got {pair:?}"))?;
            let x = x.parse().with_context(|| format!("invalid x in {pair:?}"))?;
            let y = y.parse().with_context(|| format!("invalid y in {pair:?}"))?;
            Ok(Point::new(x, y))
        })
        .collect()
}
