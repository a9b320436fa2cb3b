use super::layout;
use super::MenuNode;
use crate::config::{CURSOR_GLYPH, OPTION_COLUMN};
use crate::error::{Error, Result};
use crate::ui::input_logic::{select_next, select_prev};
use crate::ui::{put_centered, CharDisplay};

/// What a press on the focused option did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Selection {
    /// A group was entered; its children are now shown.
    Descended,
    /// An action's handler ran and the screen is back at the top level.
    Invoked,
    /// Nothing to do: a no-op entry, an empty level or an inactive screen.
    Ignored,
}

/// Paged, cursor-addressable view of one menu level on a character display.
///
/// The screen owns the display it draws on and borrows the tree. There is
/// no navigation stack: entering a group replaces `options` and records the
/// group as `parent`; running an action restores the top-level options.
pub struct MenuScreen<'a, D, P> {
    display: D,
    title: &'a str,
    subtitle: &'a str,
    root: &'a [MenuNode<'a, P>],
    options: &'a [MenuNode<'a, P>],
    parent: Option<&'a MenuNode<'a, P>>,
    focus: usize,
    active: bool,
    columns: u8,
    rows: u8,
    header_rows: u8,
}

impl<'a, D, P> MenuScreen<'a, D, P>
where
    D: CharDisplay,
{
    /// Create an inactive screen over `options`.
    ///
    /// Fails if the title and subtitle would leave no row for options.
    /// Nothing is drawn until [`start`](Self::start).
    pub fn new(
        display: D,
        title: &'a str,
        subtitle: &'a str,
        options: &'a [MenuNode<'a, P>],
    ) -> Result<Self> {
        let columns = display.columns();
        let rows = display.rows();
        let header_rows = layout::header_rows(title, subtitle);
        if rows <= header_rows {
            error!("Menu: {} rows cannot fit {} header rows", rows, header_rows);
            return Err(Error::NoBodyRows { rows, header_rows });
        }

        Ok(Self {
            display,
            title,
            subtitle,
            root: options,
            options,
            parent: None,
            focus: 1,
            active: false,
            columns,
            rows,
            header_rows,
        })
    }

    /// Activate the screen on the first option and draw it.
    pub fn start(&mut self) {
        self.active = true;
        self.focus = 1;
        self.render();
    }

    /// Redraw everything. Does nothing while the screen is inactive.
    pub fn render(&mut self) {
        if !self.active {
            return;
        }

        self.display.clear();
        self.render_header();
        self.render_cursor();
        self.render_options();
    }

    fn render_header(&mut self) {
        let mut row = 0;
        for line in [self.title, self.subtitle] {
            if !line.is_empty() {
                put_centered(&mut self.display, row, line);
                row += 1;
            }
        }
    }

    fn render_cursor(&mut self) {
        let cursor = (!self.options.is_empty()).then(|| self.cursor_row());
        for row in 0..self.body_rows() {
            self.display.move_to(0, self.header_rows + row as u8);
            if cursor == Some(row) {
                self.display.put_str(CURSOR_GLYPH);
            } else {
                self.display.put_str(" ");
            }
        }
    }

    fn render_options(&mut self) {
        let width = (self.columns as usize).saturating_sub(1);
        for (row, option) in self.viewport().iter().enumerate() {
            self.display.move_to(OPTION_COLUMN, self.header_rows + row as u8);
            self.display.put_str(layout::truncate(option.title(), width));
        }
    }

    /// Focus the next option, wrapping to the first.
    pub fn focus_next(&mut self) {
        if !self.active || self.options.is_empty() {
            return;
        }
        self.focus = select_next(self.focus, self.options.len());
        trace!("Menu: focus -> {}", self.focus);
        self.render();
    }

    /// Focus the previous option, wrapping to the last.
    pub fn focus_prev(&mut self) {
        if !self.active || self.options.is_empty() {
            return;
        }
        self.focus = select_prev(self.focus, self.options.len());
        trace!("Menu: focus -> {}", self.focus);
        self.render();
    }

    /// Focus option `n` (1-based) directly. Out-of-range values are ignored.
    pub fn focus_set(&mut self, n: usize) {
        if n == 0 || n > self.options.len() {
            warn!("Menu: focus {} out of range 1..={}", n, self.options.len());
            return;
        }
        self.focus = n;
        self.render();
    }

    /// Act on the focused option.
    ///
    /// * group - show its children, focus on the first
    /// * action - call `handler(screen, title, payload)`, then return to the
    ///   top level; the top level is restored even when the handler fails,
    ///   and the handler's error is returned as-is
    /// * no-op, empty level or inactive screen - nothing happens
    pub fn choose<F, E>(&mut self, mut handler: F) -> core::result::Result<Selection, E>
    where
        F: FnMut(&mut Self, &'a str, &'a P) -> core::result::Result<(), E>,
    {
        if !self.active {
            return Ok(Selection::Ignored);
        }
        let Some(node) = self.focused() else {
            return Ok(Selection::Ignored);
        };

        match node {
            MenuNode::Group { title, children } => {
                debug!("Menu: entering {} ({} options)", *title, children.len());
                self.parent = Some(node);
                self.options = *children;
                self.start();
                Ok(Selection::Descended)
            }
            MenuNode::Action { title, payload } => {
                info!("Menu: running {}", *title);
                let outcome = handler(self, *title, payload);
                self.return_to_root();
                outcome.map(|()| Selection::Invoked)
            }
            MenuNode::Noop { title } => {
                trace!("Menu: {} is a no-op", *title);
                Ok(Selection::Ignored)
            }
        }
    }

    fn return_to_root(&mut self) {
        self.options = self.root;
        self.parent = None;
        self.start();
    }

    /// Option under the cursor, `None` when the level is empty.
    pub fn focused(&self) -> Option<&'a MenuNode<'a, P>> {
        let options = self.options;
        options.get(self.focus.checked_sub(1)?)
    }

    /// Options on the current page.
    pub fn viewport(&self) -> &'a [MenuNode<'a, P>] {
        let options = self.options;
        &options[layout::viewport(options.len(), self.focus, self.body_rows())]
    }

    pub fn current_page(&self) -> usize {
        layout::page_index(self.focus, self.body_rows())
    }

    pub fn page_count(&self) -> usize {
        layout::page_count(self.options.len(), self.body_rows())
    }

    /// Body row of the cursor within the current page.
    pub fn cursor_row(&self) -> usize {
        layout::cursor_row(self.focus, self.body_rows())
    }
}

impl<'a, D, P> MenuScreen<'a, D, P> {
    /// 1-based index of the focused option.
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The current level's options.
    pub fn options(&self) -> &'a [MenuNode<'a, P>] {
        self.options
    }

    /// True when the top-level options are shown.
    pub fn is_at_root(&self) -> bool {
        core::ptr::eq(self.options, self.root)
    }

    /// The group whose children are shown, `None` at the top level.
    pub fn parent(&self) -> Option<&'a MenuNode<'a, P>> {
        self.parent
    }

    pub fn parent_title(&self) -> Option<&'a str> {
        self.parent.map(MenuNode::title)
    }

    pub fn title(&self) -> &'a str {
        self.title
    }

    pub fn subtitle(&self) -> &'a str {
        self.subtitle
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn header_rows(&self) -> u8 {
        self.header_rows
    }

    /// Rows left for options under the header. Always at least 1.
    pub fn body_rows(&self) -> usize {
        (self.rows - self.header_rows) as usize
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Direct access for handlers that show their own status text. The
    /// next render overwrites whatever they draw.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}
