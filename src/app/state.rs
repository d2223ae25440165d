use super::layout::LayoutMode;
use crate::error::{Error, Result};

/// Construction-time configuration of a reveal layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealOptions {
    /// Path or `file://` URL of the image painted on the surface.
    pub source: String,
    /// Style class of the root container, also used as its id salt.
    pub style_class: String,
    /// Confine the surface to a centred box instead of the full container.
    pub contained: bool,
    /// Within contained mode, use the small fixed name-card box.
    pub name_card: bool,
    /// Seed for brush generation and stamping; random when `None`.
    pub seed: Option<u64>,
}

impl RevealOptions {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_style_class(mut self, class: impl Into<String>) -> Self {
        self.style_class = class.into();
        self
    }

    pub fn with_contained(mut self, contained: bool) -> Self {
        self.contained = contained;
        self
    }

    pub fn with_name_card(mut self, name_card: bool) -> Self {
        self.name_card = name_card;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn layout_mode(&self) -> LayoutMode {
        LayoutMode::from_flags(self.contained, self.name_card)
    }
}

/// What the widget is showing. Derived from the load and erasing flags only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    ReadyIdle,
    ReadyErasing,
}

impl Phase {
    pub fn from_flags(loaded: bool, erasing: bool) -> Self {
        match (loaded, erasing) {
            (false, _) => Phase::Loading,
            (true, false) => Phase::ReadyIdle,
            (true, true) => Phase::ReadyErasing,
        }
    }

    pub fn shows_placeholder(self) -> bool {
        self == Phase::Loading
    }

    /// The hint is visible while idle and faded out while painting.
    pub fn shows_hint(self) -> bool {
        self == Phase::ReadyIdle
    }
}

/// Parse demo command-line arguments (without the program name).
///
/// `IMAGE [--contained] [--name-card] [--class NAME] [--seed N]`; unknown
/// flags are ignored and a missing image leaves `source` empty.
pub fn parse_options<I>(args: I) -> Result<RevealOptions>
where
    I: IntoIterator<Item = String>,
{
    let mut options = RevealOptions::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--contained" => options.contained = true,
            "--name-card" => {
                options.contained = true;
                options.name_card = true;
            }
            "--class" => {
                let class = args
                    .next()
                    .ok_or_else(|| Error::InvalidArgument("--class needs a value".to_owned()))?;
                options.style_class = class;
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| Error::InvalidArgument("--seed needs a value".to_owned()))?;
                options.seed = Some(parse_seed(&value)?);
            }
            other => {
                if let Some(class) = other.strip_prefix("--class=") {
                    options.style_class = class.to_owned();
                } else if let Some(seed) = other.strip_prefix("--seed=") {
                    options.seed = Some(parse_seed(seed)?);
                } else if other.starts_with("--") {
                    log::warn!("ignoring unknown flag {other}");
                } else {
                    options.source = other.to_owned();
                }
            }
        }
    }
    Ok(options)
}

fn parse_seed(value: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("seed must be an unsigned integer, got {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn phases_follow_flags() {
        assert_eq!(Phase::from_flags(false, false), Phase::Loading);
        assert_eq!(Phase::from_flags(false, true), Phase::Loading);
        assert_eq!(Phase::from_flags(true, false), Phase::ReadyIdle);
        assert_eq!(Phase::from_flags(true, true), Phase::ReadyErasing);
        assert!(Phase::Loading.shows_placeholder());
        assert!(!Phase::Loading.shows_hint());
        assert!(Phase::ReadyIdle.shows_hint());
        assert!(!Phase::ReadyErasing.shows_hint());
    }

    #[test]
    fn parses_full_command_line() {
        let options =
            parse_options(args(&["cover.png", "--name-card", "--class", "card", "--seed=9"]))
                .unwrap();
        assert_eq!(
            options,
            RevealOptions::new("cover.png")
                .with_contained(true)
                .with_name_card(true)
                .with_style_class("card")
                .with_seed(9)
        );
        assert_eq!(options.layout_mode(), LayoutMode::Contained { name_card: true });
    }

    #[test]
    fn defaults_to_full_layout() {
        let options = parse_options(args(&["--verbose", "x.jpg"])).unwrap();
        assert_eq!(options.source, "x.jpg");
        assert_eq!(options.layout_mode(), LayoutMode::Full);
    }

    #[test]
    fn bad_seed_is_rejected() {
        assert!(matches!(
            parse_options(args(&["--seed", "abc"])),
            Err(Error::InvalidArgument(_))
        ));
        assert!(parse_options(args(&["--class"])).is_err());
    }
}
