//! Map files: one `x y` pair per line, world coordinates.
//!
//! Blank lines and `#` comments are skipped. Commas are accepted as
//! separators too, so `x,y` works as well as `x y`.

use anyhow::{anyhow, bail, Context, Result};
use cellplan::fixtures::reference_points;
use cellplan::geom2::Point;
use std::io::Read;
use std::path::Path;

/// Points from `path` (`-` reads stdin); the built-in reference map when `None`.
pub fn load_points(path: Option<&Path>) -> Result<Vec<Point>> {
    let Some(path) = path else {
        return Ok(reference_points());
    };
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading map from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading map {}", path.display()))?
    };
    parse_points(&text).with_context(|| format!("parsing map {}", path.display()))
}

pub fn parse_points(text: &str) -> Result<Vec<Point>> {
    let mut out = Vec::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let p = parse_xy(line).with_context(|| format!("line {}", lineno + 1))?;
        out.push(p);
    }
    Ok(out)
}

/// `"x y"` or `"x,y"` as a point.
pub fn parse_xy(s: &str) -> Result<Point> {
    let fields: Vec<&str> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();
    if fields.len() != 2 {
        bail!("expected two coordinates, got {:?}", s);
    }
    let coord = |f: &str| {
        f.parse::<f64>()
            .map_err(|e| anyhow!("bad coordinate {f:?}: {e}"))
            .and_then(|v| {
                if v.is_finite() {
                    Ok(v)
                } else {
                    Err(anyhow!("non-finite coordinate {f:?}"))
                }
            })
    };
    Ok(Point::new(coord(fields[0])?, coord(fields[1])?))
}
