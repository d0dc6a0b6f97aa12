//! Row-range windows over a buffer store.
//!
//! A [`Window`] addresses rows `[start, start + len)` of every column of a
//! [`BufferStore`](crate::BufferStore). It holds one pre-sliced `&mut [u8]`
//! per attribute, so typed access is a bounds-free reinterpretation of an
//! existing slice and splitting a window yields windows over disjoint
//! memory. [`View`] is the shared, read-only counterpart.
//!
//! # Borrow-checker design
//!
//! Windows borrow the store, so the store cannot be released, resized, or
//! re-windowed while a window is alive. [`Window::slice`] reborrows the
//! parent mutably; [`Window::into_slice`], [`Window::split_at`] and
//! [`Window::partition`] consume it and keep the original lifetime. Two
//! overlapping mutable windows cannot exist at once.
//!
//! Windows and views own a small column list with a destructor, so a
//! binding holds its borrow of the store until it goes out of scope, not
//! merely until its last use. Scope windows in a block (or `drop` them)
//! before viewing or releasing the store again.
//!
//! Typed accessors on a window borrow the whole window. To hold several
//! columns at once, such as reading velocities while writing positions,
//! split the window with [`Window::columns_mut`].

use fleck_core::{Attribute, Schema};
use smallvec::SmallVec;

/// Columns kept inline before the column list spills to the heap.
const INLINE_COLUMNS: usize = 8;

/// Assert that `[start, start + len)` lies within `available` rows.
pub(crate) fn check_range(available: usize, start: usize, len: usize) {
    let fits = start.checked_add(len).is_some_and(|end| end <= available);
    assert!(
        fits,
        "row range {start}+{len} out of bounds for {available} rows"
    );
}

/// Assert that attribute `index` holds `T`.
fn check_kind<T: Attribute>(schema: &Schema, index: usize) {
    let kind = schema.type_of(index);
    assert!(
        kind == T::KIND,
        "attribute '{}' is {kind}, not {}",
        schema.name_of(index),
        T::KIND
    );
}

// ── Window ──────────────────────────────────────────────────────

/// Exclusive, read-write access to a contiguous row range of a store.
///
/// Created by [`BufferStore::slice_all`](crate::BufferStore::slice_all) or
/// [`BufferStore::window`](crate::BufferStore::window). Column accessors
/// return slices of exactly [`len`](Self::len) elements that alias the
/// store's buffers.
pub struct Window<'a> {
    schema: &'a Schema,
    columns: SmallVec<[&'a mut [u8]; INLINE_COLUMNS]>,
    start: usize,
    len: usize,
}

// Compile-time assertion: windows can be handed to worker threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Window<'static>>();
        assert_send_sync::<View<'static>>();
    }
};

impl<'a> Window<'a> {
    /// Build a window from columns already sliced to `[start, start + len)`.
    pub(crate) fn from_columns(
        schema: &'a Schema,
        columns: SmallVec<[&'a mut [u8]; INLINE_COLUMNS]>,
        start: usize,
        len: usize,
    ) -> Self {
        debug_assert_eq!(columns.len(), schema.len());
        Self {
            schema,
            columns,
            start,
            len,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the window covers no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Absolute index of the first row within the store.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The schema describing every column.
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Index of the attribute called `name`. Panics if absent.
    pub fn attribute_index(&self, name: &str) -> usize {
        self.schema.attribute_index(name)
    }

    /// Bytes per row of attribute `index`.
    pub fn attribute_stride(&self, index: usize) -> usize {
        self.schema.type_of(index).size()
    }

    /// Raw bytes of attribute `index` for this window's rows.
    pub fn column_bytes(&self, index: usize) -> &[u8] {
        self.schema.type_of(index);
        &self.columns[index]
    }

    /// Raw bytes of attribute `index` for this window's rows, mutably.
    pub fn column_bytes_mut(&mut self, index: usize) -> &mut [u8] {
        self.schema.type_of(index);
        &mut self.columns[index]
    }

    /// Typed view of attribute `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or the attribute is not a `T`.
    pub fn get<T: Attribute>(&self, index: usize) -> &[T] {
        check_kind::<T>(self.schema, index);
        bytemuck::cast_slice(&*self.columns[index])
    }

    /// Typed mutable view of attribute `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or the attribute is not a `T`.
    pub fn get_mut<T: Attribute>(&mut self, index: usize) -> &mut [T] {
        check_kind::<T>(self.schema, index);
        bytemuck::cast_slice_mut(&mut *self.columns[index])
    }

    /// Typed view of the attribute called `name`.
    pub fn get_named<T: Attribute>(&self, name: &str) -> &[T] {
        self.get(self.schema.attribute_index(name))
    }

    /// Typed mutable view of the attribute called `name`.
    pub fn get_named_mut<T: Attribute>(&mut self, name: &str) -> &mut [T] {
        let index = self.schema.attribute_index(name);
        self.get_mut(index)
    }

    /// Typed view of `name`, or `None` if it is absent or not a `T`.
    pub fn try_get<T: Attribute>(&self, name: &str) -> Option<&[T]> {
        let index = self.schema.attribute_index_try_kind(name, T::KIND)?;
        Some(bytemuck::cast_slice(&*self.columns[index]))
    }

    /// Typed mutable view of `name`, or `None` if it is absent or not a `T`.
    pub fn try_get_mut<T: Attribute>(&mut self, name: &str) -> Option<&mut [T]> {
        let index = self.schema.attribute_index_try_kind(name, T::KIND)?;
        Some(bytemuck::cast_slice_mut(&mut *self.columns[index]))
    }

    /// Write attribute `index`'s default into every row of the window.
    ///
    /// Rows outside the window are untouched.
    pub fn init_default(&mut self, index: usize) {
        let schema = self.schema;
        let default = schema.default_value_bytes(index);
        for row in self.columns[index].chunks_exact_mut(default.len()) {
            row.copy_from_slice(default);
        }
    }

    /// [`init_default`](Self::init_default) by attribute name.
    pub fn init_default_named(&mut self, name: &str) {
        let index = self.schema.attribute_index(name);
        self.init_default(index);
    }

    /// Write every attribute's default into every row of the window.
    pub fn init_all_defaults(&mut self) {
        for index in self.schema.attribute_indices() {
            self.init_default(index);
        }
    }

    /// Sub-window of rows `[start, start + len)` relative to this window.
    ///
    /// # Panics
    ///
    /// Panics unless `start + len <= self.len()`.
    pub fn slice(&mut self, start: usize, len: usize) -> Window<'_> {
        check_range(self.len, start, len);
        let schema = self.schema;
        let columns = self
            .columns
            .iter_mut()
            .zip(schema.types())
            .map(|(column, kind)| {
                let stride = kind.size();
                &mut column[start * stride..(start + len) * stride]
            })
            .collect();
        Window::from_columns(schema, columns, self.start + start, len)
    }

    /// Like [`slice`](Self::slice), but consumes the window and keeps its
    /// full lifetime.
    pub fn into_slice(self, start: usize, len: usize) -> Window<'a> {
        check_range(self.len, start, len);
        let schema = self.schema;
        let columns = self
            .columns
            .into_iter()
            .zip(schema.types())
            .map(|(column, kind)| {
                let stride = kind.size();
                &mut column[start * stride..(start + len) * stride]
            })
            .collect();
        Window::from_columns(schema, columns, self.start + start, len)
    }

    /// The first `n` rows.
    ///
    /// # Panics
    ///
    /// Panics unless `n <= self.len()`.
    pub fn take_front(&mut self, n: usize) -> Window<'_> {
        self.slice(0, n)
    }

    /// Split into rows `[0, mid)` and `[mid, len)`.
    ///
    /// # Panics
    ///
    /// Panics if `mid > self.len()`.
    pub fn split_at(self, mid: usize) -> (Window<'a>, Window<'a>) {
        check_range(self.len, 0, mid);
        let schema = self.schema;
        let mut left = SmallVec::with_capacity(self.columns.len());
        let mut right = SmallVec::with_capacity(self.columns.len());
        for (column, kind) in self.columns.into_iter().zip(schema.types()) {
            let (head, tail) = column.split_at_mut(mid * kind.size());
            left.push(head);
            right.push(tail);
        }
        (
            Window::from_columns(schema, left, self.start, mid),
            Window::from_columns(schema, right, self.start + mid, self.len - mid),
        )
    }

    /// Consecutive disjoint windows of at most `chunk_rows` rows that
    /// together cover this window. An empty window yields no chunks.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_rows == 0`.
    pub fn partition(self, chunk_rows: usize) -> Vec<Window<'a>> {
        assert!(chunk_rows > 0, "partition chunk size must be non-zero");
        let mut chunks = Vec::with_capacity(self.len.div_ceil(chunk_rows));
        let mut rest = self;
        while rest.len > chunk_rows {
            let (head, tail) = rest.split_at(chunk_rows);
            chunks.push(head);
            rest = tail;
        }
        if !rest.is_empty() {
            chunks.push(rest);
        }
        chunks
    }

    /// Split the window into independently borrowable columns.
    ///
    /// Each column can be taken once from the returned [`ColumnsMut`], and
    /// every taken slice lives as long as the split borrow, so one column
    /// can be read while another is written.
    pub fn columns_mut(&mut self) -> ColumnsMut<'_> {
        ColumnsMut {
            schema: self.schema,
            columns: self.columns.iter_mut().map(|column| Some(&mut **column)).collect(),
        }
    }

    /// Read-only view of the same rows.
    pub fn as_view(&self) -> View<'_> {
        View {
            schema: self.schema,
            columns: self.columns.iter().map(|column| &**column).collect(),
            start: self.start,
            len: self.len,
        }
    }
}

impl std::fmt::Debug for Window<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("schema", &self.schema.id())
            .field("start", &self.start)
            .field("len", &self.len)
            .finish()
    }
}

// ── ColumnsMut ──────────────────────────────────────────────────

/// The columns of a [`Window`], each borrowable once.
///
/// Created by [`Window::columns_mut`].
pub struct ColumnsMut<'w> {
    schema: &'w Schema,
    columns: SmallVec<[Option<&'w mut [u8]>; INLINE_COLUMNS]>,
}

impl<'w> ColumnsMut<'w> {
    /// Take attribute `index` as a typed mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range, the attribute is not a `T`, or the
    /// column was already taken.
    pub fn take<T: Attribute>(&mut self, index: usize) -> &'w mut [T] {
        check_kind::<T>(self.schema, index);
        match self.columns[index].take() {
            Some(column) => bytemuck::cast_slice_mut(column),
            None => panic!(
                "attribute '{}' is already borrowed",
                self.schema.name_of(index)
            ),
        }
    }

    /// [`take`](Self::take) by attribute name. Panics if absent.
    pub fn take_named<T: Attribute>(&mut self, name: &str) -> &'w mut [T] {
        let index = self.schema.attribute_index(name);
        self.take(index)
    }

    /// Whether attribute `index` is still available.
    pub fn is_available(&self, index: usize) -> bool {
        self.schema.type_of(index);
        self.columns[index].is_some()
    }
}

impl std::fmt::Debug for ColumnsMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnsMut")
            .field("schema", &self.schema.id())
            .field("columns", &self.columns.len())
            .finish()
    }
}

// ── View ────────────────────────────────────────────────────────

/// Shared, read-only access to a contiguous row range of a store.
///
/// Any number of views may coexist and cross threads. Cloning is cheap.
#[derive(Clone)]
pub struct View<'a> {
    schema: &'a Schema,
    columns: SmallVec<[&'a [u8]; INLINE_COLUMNS]>,
    start: usize,
    len: usize,
}

impl<'a> View<'a> {
    pub(crate) fn from_columns(
        schema: &'a Schema,
        columns: SmallVec<[&'a [u8]; INLINE_COLUMNS]>,
        start: usize,
        len: usize,
    ) -> Self {
        debug_assert_eq!(columns.len(), schema.len());
        Self {
            schema,
            columns,
            start,
            len,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view covers no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Absolute index of the first row within the store.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The schema describing every column.
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Index of the attribute called `name`. Panics if absent.
    pub fn attribute_index(&self, name: &str) -> usize {
        self.schema.attribute_index(name)
    }

    /// Bytes per row of attribute `index`.
    pub fn attribute_stride(&self, index: usize) -> usize {
        self.schema.type_of(index).size()
    }

    /// Raw bytes of attribute `index` for this view's rows.
    pub fn column_bytes(&self, index: usize) -> &'a [u8] {
        self.schema.type_of(index);
        self.columns[index]
    }

    /// Typed view of attribute `index`. Panics on a kind mismatch.
    pub fn get<T: Attribute>(&self, index: usize) -> &'a [T] {
        check_kind::<T>(self.schema, index);
        bytemuck::cast_slice(self.columns[index])
    }

    /// Typed view of the attribute called `name`.
    pub fn get_named<T: Attribute>(&self, name: &str) -> &'a [T] {
        self.get(self.schema.attribute_index(name))
    }

    /// Typed view of `name`, or `None` if it is absent or not a `T`.
    pub fn try_get<T: Attribute>(&self, name: &str) -> Option<&'a [T]> {
        let index = self.schema.attribute_index_try_kind(name, T::KIND)?;
        Some(bytemuck::cast_slice(self.columns[index]))
    }

    /// Sub-view of rows `[start, start + len)` relative to this view.
    ///
    /// # Panics
    ///
    /// Panics unless `start + len <= self.len()`.
    pub fn slice(&self, start: usize, len: usize) -> View<'a> {
        check_range(self.len, start, len);
        let columns = self
            .columns
            .iter()
            .zip(self.schema.types())
            .map(|(column, kind)| {
                let stride = kind.size();
                &column[start * stride..(start + len) * stride]
            })
            .collect();
        View::from_columns(self.schema, columns, self.start + start, len)
    }

    /// The first `n` rows.
    pub fn take_front(&self, n: usize) -> View<'a> {
        self.slice(0, n)
    }

    /// Split into rows `[0, mid)` and `[mid, len)`.
    pub fn split_at(&self, mid: usize) -> (View<'a>, View<'a>) {
        check_range(self.len, 0, mid);
        (self.slice(0, mid), self.slice(mid, self.len - mid))
    }
}

impl std::fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("schema", &self.schema.id())
            .field("start", &self.start)
            .field("len", &self.len)
            .finish()
    }
}
