/// Where one line lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinePosition {
    pub page_index: usize,
    pub y: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Advance {
    /// Page holding the last placed line.
    pub page_index: usize,
    pub positions: Vec<LinePosition>,
    pub page_breaks: usize,
}

/// Vertical write position over an unbounded run of pages.
///
/// y grows upward (PDF user space): lines are placed from the top of the page
/// downward, and a new page starts once the next baseline would drop below
/// `min_y`. The break happens before the line is placed, so a line that still
/// fits never opens a page.
#[derive(Clone, Debug)]
pub struct PageCursor {
    page_index: usize,
    next_y: i32,
    min_y: i32,
    max_y: i32,
    line_height: i32,
}

impl PageCursor {
    /// `first_y` is where the first line of page 0 goes; later pages start at `max_y`.
    pub fn new(first_y: i32, min_y: i32, max_y: i32, line_height: i32) -> Self {
        debug_assert!(line_height > 0);
        debug_assert!(min_y <= first_y && first_y <= max_y);
        PageCursor {
            page_index: 0,
            next_y: first_y,
            min_y,
            max_y,
            line_height,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn next_y(&self) -> i32 {
        self.next_y
    }

    pub fn advance(&mut self, lines: usize) -> Advance {
        let mut positions = Vec::with_capacity(lines);
        let mut page_breaks = 0;

        for _ in 0..lines {
            if self.next_y < self.min_y {
                self.page_index += 1;
                self.next_y = self.max_y;
                page_breaks += 1;
                log::debug!("page break: now on page {}", self.page_index);
            }
            positions.push(LinePosition {
                page_index: self.page_index,
                y: self.next_y,
            });
            self.next_y -= self.line_height;
        }

        Advance {
            page_index: self.page_index,
            positions,
            page_breaks,
        }
    }
}
