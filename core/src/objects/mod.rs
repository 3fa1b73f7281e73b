/// An index into a `Heap` identifying a single heap-allocated object.
///
/// Replaces an intrusive `next`-pointer linked list with a plain index into
/// an owning `Vec` — cheap to copy, trivially `Eq`, and enumerable in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjHandle(usize);

/// A heap-allocated object. The only kind this core needs is `String`.
#[derive(Debug, Clone)]
pub enum Obj {
  String(ObjString),
}

/// An owned, heap-allocated string payload.
#[derive(Debug, Clone)]
pub struct ObjString {
  pub chars: String,
}

/// The arena that owns every heap-allocated object created while compiling
/// and running a single program.
///
/// This arena does not de-duplicate incoming strings (see DESIGN.md) —
/// every allocation gets a fresh handle. There is no collector: objects
/// live until the `Heap` is dropped, which happens when the owning `Vm` is
/// dropped.
#[derive(Debug, Default)]
pub struct Heap {
  objects: Vec<Obj>,
}

impl Heap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Allocates a new string object and returns its handle.
  pub fn alloc_string(&mut self, chars: String) -> ObjHandle {
    let handle = ObjHandle(self.objects.len());
    self.objects.push(Obj::String(ObjString { chars }));
    handle
  }

  pub fn get(&self, handle: ObjHandle) -> &Obj {
    &self.objects[handle.0]
  }

  /// Borrows the character payload of a string object.
  ///
  /// Panics if `handle` does not refer to a `String` — the compiler and VM
  /// only ever produce `ObjHandle`s for the kind of object they allocated,
  /// so a mismatch here means a bug elsewhere, not bad input.
  pub fn as_str(&self, handle: ObjHandle) -> &str {
    match self.get(handle) {
      Obj::String(s) => &s.chars,
    }
  }

  /// Structural equality between two heap objects: same kind, same payload.
  pub fn values_equal(&self, a: ObjHandle, b: ObjHandle) -> bool {
    match (self.get(a), self.get(b)) {
      (Obj::String(x), Obj::String(y)) => x.chars == y.chars,
    }
  }

  /// Renders a heap object the way `print` displays it.
  pub fn display(&self, handle: ObjHandle) -> String {
    match self.get(handle) {
      Obj::String(s) => s.chars.clone(),
    }
  }

  /// Number of objects currently tracked. Exposed for tests and the `plv`
  /// diagnostics crate; not part of the VM's semantic contract.
  pub fn len(&self) -> usize {
    self.objects.len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.is_empty()
  }
}
