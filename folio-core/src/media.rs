/// Playback command for one project card's hover video.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaCommand {
    Play(usize),
    /// Pause and rewind to the first frame.
    PauseReset(usize),
}

/// Hover tracking across the project cards. Only cards with a video take
/// part; image cards swap by CSS alone.
#[derive(Clone, Debug)]
pub struct MediaHover {
    has_video: Vec<bool>,
    hovered: Option<usize>,
}

impl MediaHover {
    pub fn new(has_video: Vec<bool>) -> Self {
        MediaHover {
            has_video,
            hovered: None,
        }
    }

    /// Hover moved to `index` (or off every card). Returns commands for
    /// every video card; repeated hovers of the same card yield nothing.
    pub fn hover(&mut self, index: Option<usize>) -> Vec<MediaCommand> {
        let index = index.filter(|i| *i < self.has_video.len());
        if index == self.hovered {
            return Vec::new();
        }
        self.hovered = index;
        self.has_video
            .iter()
            .enumerate()
            .filter(|(_, video)| **video)
            .map(|(i, _)| {
                if Some(i) == index {
                    MediaCommand::Play(i)
                } else {
                    MediaCommand::PauseReset(i)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hovered_video_plays_others_reset() {
        let mut media = MediaHover::new(vec![true, false, true]);
        assert_eq!(
            media.hover(Some(2)),
            vec![MediaCommand::PauseReset(0), MediaCommand::Play(2)]
        );
        assert!(media.hover(Some(2)).is_empty());
        assert_eq!(
            media.hover(None),
            vec![MediaCommand::PauseReset(0), MediaCommand::PauseReset(2)]
        );
    }

    #[test]
    fn out_of_range_counts_as_leave() {
        let mut media = MediaHover::new(vec![true]);
        media.hover(Some(0));
        assert_eq!(media.hover(Some(9)), vec![MediaCommand::PauseReset(0)]);
        assert!(media.hover(None).is_empty());
    }
}
