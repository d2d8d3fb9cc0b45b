//! Client-side table presentation: filter, then stable sort, then paginate.
//!
//! Columns are plain records of function pointers; a table is rendered by
//! walking them, with no dispatch beyond picking the function per column.

use std::cmp::Ordering;

pub const EMPTY_MESSAGE: &str = "No results.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey<'a> {
    Number(f64),
    Text(&'a str),
}

impl SortKey<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

pub type SortAccessor<T> = for<'a> fn(&'a T) -> SortKey<'a>;
pub type TextAccessor<T> = for<'a> fn(&'a T) -> &'a str;

pub struct Column<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub sort: Option<SortAccessor<T>>,
    /// Raw text the column filter matches against.
    pub filter_text: Option<TextAccessor<T>>,
    pub render: fn(&T) -> String,
}

impl<T> Column<T> {
    pub fn new(key: &'static str, label: &'static str, render: fn(&T) -> String) -> Self {
        Self {
            key,
            label,
            sort: None,
            filter_text: None,
            render,
        }
    }

    pub fn sortable(mut self, accessor: SortAccessor<T>) -> Self {
        self.sort = Some(accessor);
        self
    }

    pub fn filterable(mut self, accessor: TextAccessor<T>) -> Self {
        self.filter_text = Some(accessor);
        self
    }
}

pub struct TableSpec<T> {
    pub columns: Vec<Column<T>>,
    pub highlight: Option<fn(&T) -> bool>,
}

impl<T> TableSpec<T> {
    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|column| column.key == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: &'static str,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    sort: Option<SortState>,
    filter_column: &'static str,
    filter: String,
    page_index: usize,
    page_size: usize,
}

impl TableState {
    pub fn new(filter_column: &'static str, page_size: usize) -> Self {
        Self {
            sort: None,
            filter_column,
            filter: String::new(),
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Unsorted and descending go to ascending; ascending goes to descending.
    pub fn toggle_sort(&mut self, column: &'static str) {
        let direction = match self.sort {
            Some(SortState {
                column: current,
                direction: SortDirection::Ascending,
            }) if current == column => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortState { column, direction });
    }

    /// Changing the filter text always returns to the first page.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.filter {
            self.filter = text;
            self.page_index = 0;
        }
    }

    pub fn next_page(&mut self, page_count: usize) {
        if self.page_index + 1 < page_count {
            self.page_index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Jumps to a zero-based page; out-of-range values are clamped on render.
    pub fn go_to_page(&mut self, index: usize) {
        self.page_index = index;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub sorted: Option<SortDirection>,
}

#[derive(Debug)]
pub struct TableRow<'a, T> {
    /// Position in the unfiltered, unsorted input.
    pub source_index: usize,
    pub item: &'a T,
    pub cells: Vec<String>,
    pub highlighted: bool,
}

#[derive(Debug)]
pub struct TableView<'a, T> {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<TableRow<'a, T>>,
    pub filtered_len: usize,
    pub page_index: usize,
    pub page_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

impl<T> TableView<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

pub fn render_table<'a, T>(
    spec: &TableSpec<T>,
    items: &'a [T],
    state: &mut TableState,
) -> TableView<'a, T> {
    let mut visible: Vec<usize> = match spec
        .column(state.filter_column)
        .and_then(|column| column.filter_text)
    {
        Some(text) if !state.filter.is_empty() => (0..items.len())
            .filter(|&index| text(&items[index]).contains(state.filter.as_str()))
            .collect(),
        _ => (0..items.len()).collect(),
    };

    if let Some(sort) = state.sort {
        if let Some(key) = spec.column(sort.column).and_then(|column| column.sort) {
            // `sort_by` is stable, so ties keep input order in both directions.
            visible.sort_by(|&a, &b| {
                let ordering = key(&items[a]).compare(&key(&items[b]));
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
    }

    let filtered_len = visible.len();
    let page_count = filtered_len.div_ceil(state.page_size);
    if state.page_index >= page_count {
        state.page_index = page_count.saturating_sub(1);
    }

    let rows = visible
        .into_iter()
        .skip(state.page_index * state.page_size)
        .take(state.page_size)
        .map(|index| {
            let item = &items[index];
            TableRow {
                source_index: index,
                item,
                cells: spec.columns.iter().map(|column| (column.render)(item)).collect(),
                highlighted: spec.highlight.is_some_and(|highlight| highlight(item)),
            }
        })
        .collect();

    let headers = spec
        .columns
        .iter()
        .map(|column| HeaderCell {
            key: column.key,
            label: column.label,
            sortable: column.sort.is_some(),
            sorted: state
                .sort
                .filter(|sort| sort.column == column.key)
                .map(|sort| sort.direction),
        })
        .collect();

    TableView {
        headers,
        rows,
        filtered_len,
        page_index: state.page_index,
        page_count,
        can_previous: state.page_index > 0,
        can_next: state.page_index + 1 < page_count,
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
