use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub prompt_area: Rect, // zero height unless a prompt is open
    pub status_area: Rect,
}

impl Layout {
    /// Smallest terminal the dashboard can be drawn in
    pub const MIN_WIDTH: u16 = 40;
    pub const MIN_HEIGHT: u16 = 12;

    pub fn calculate(size: Rect, prompt_open: bool) -> Self {
        let prompt_height = if prompt_open { 3 } else { 0 };

        // Header (title + hints), body, prompt, status
        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(prompt_height),
                Constraint::Length(1),
            ])
            .split(size);

        Self {
            header_area: vertical[0],
            body_area: vertical[1],
            prompt_area: vertical[2],
            status_area: vertical[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_area_only_when_open() {
        let size = Rect::new(0, 0, 80, 24);
        let closed = Layout::calculate(size, false);
        assert_eq!(closed.prompt_area.height, 0);
        assert_eq!(closed.header_area.height, 2);
        assert_eq!(closed.status_area.height, 1);
        assert_eq!(closed.body_area.height, 21);

        let open = Layout::calculate(size, true);
        assert_eq!(open.prompt_area.height, 3);
        assert_eq!(open.body_area.height, 18);
        assert_eq!(open.status_area.y, 23);
    }
}
