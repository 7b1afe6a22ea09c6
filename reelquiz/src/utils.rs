use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType, Padding},
};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// Padding that centers content of the given size within `area`.
pub fn centered_padding(area: Rect, height: Option<u16>, width: Option<u16>) -> Padding {
    let (top, bottom) = height.map_or((0, 0), |h| {
        let space = area.height.saturating_sub(h);
        (space / 2, space - space / 2)
    });
    let (left, right) = width.map_or((0, 0), |w| {
        let space = area.width.saturating_sub(w);
        (space / 2, space - space / 2)
    });

    Padding::new(left, right, top, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_padding() {
        let area = Rect::new(0, 0, 20, 10);

        let padding = centered_padding(area, Some(4), None);
        assert_eq!((padding.top, padding.bottom), (3, 3));
        assert_eq!((padding.left, padding.right), (0, 0));

        let padding = centered_padding(area, Some(3), Some(10));
        assert_eq!((padding.top, padding.bottom), (3, 4));
        assert_eq!((padding.left, padding.right), (5, 5));

        // Content larger than the area saturates to zero
        let padding = centered_padding(area, Some(30), None);
        assert_eq!((padding.top, padding.bottom), (0, 0));
    }
}
