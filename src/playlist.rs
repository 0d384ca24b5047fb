use crate::animation::text::IconText;
use crate::animation::text::PlainText;
use crate::animation::text::TextPainter;
use crate::animation::Animation;
use crate::sprite::Frame;

/// Any other leading character means down.
const UP_SIGIL: char = '+';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// One line of the message file. Only the first line has no direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLine {
    pub text: String,
    pub direction: Option<Direction>,
}

impl MessageLine {
    pub fn headline(line: &str) -> Self {
        Self {
            text: line.to_string(),
            direction: None,
        }
    }

    pub fn with_sigil(line: &str) -> Self {
        let mut chars = line.chars();
        let direction = match chars.next() {
            Some(UP_SIGIL) => Direction::Up,
            _ => Direction::Down,
        };

        Self {
            text: chars.as_str().to_string(),
            direction: Some(direction),
        }
    }
}

/// Splits the content of a message file into lines, dropping blank lines at
/// the end of the file.
pub fn parse_messages(content: &str) -> Vec<MessageLine> {
    let mut lines = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect::<Vec<_>>();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 {
                MessageLine::headline(line)
            } else {
                MessageLine::with_sigil(line)
            }
        })
        .collect()
}

/// Reads the message file, it is read again before every pass.
pub async fn read_messages(
    path: &camino::Utf8Path,
) -> Result<Vec<MessageLine>, crate::error::Error> {
    let content = tokio::fs::read_to_string(path).await.map_err(|source| {
        crate::error::Error::MessageSource {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(parse_messages(&content))
}

/// The two arrow frames that decorate ticker lines.
#[derive(Debug, Clone, Copy)]
pub struct Icons<'a> {
    pub up: &'a Frame,
    pub down: &'a Frame,
}

impl<'a> Icons<'a> {
    pub fn from_sprite(sprite: &'a crate::sprite::Sprite) -> Result<Self, crate::sprite::AssetError> {
        Ok(Self {
            up: sprite.frame(0)?,
            down: sprite.frame(1)?,
        })
    }

    fn for_direction(&self, direction: Direction) -> &'a Frame {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }
}

/// Turns message lines into text animations, keeping their order.
///
/// The first line is shown as-is. Every following line gets the arrow chosen
/// by its sigil drawn in front of it.
pub fn build<'a>(
    lines: Vec<MessageLine>,
    icons: Icons<'a>,
    painter: &'a dyn TextPainter,
    sleep: std::time::Duration,
) -> Vec<Animation<'a>> {
    lines
        .into_iter()
        .map(|line| {
            let text = PlainText::new(line.text, painter, sleep);
            match line.direction {
                None => Animation::Plain(text),
                Some(direction) => Animation::Icon(IconText::new(
                    icons.for_direction(direction),
                    direction,
                    text,
                )),
            }
        })
        .collect()
}
