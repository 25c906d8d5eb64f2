use core::mem::{align_of, offset_of, size_of};

/// Length-prefixed text as laid out by generated code:
/// `typedef struct { size_t len; const char utf8[]; } rtb_str;`
///
/// The bytes follow the header inline. Builtins only ever see it through a
/// pointer and never keep that pointer past the call.
#[repr(C)]
pub struct rtb_str {
    pub len: usize,
    pub utf8: [u8; 0],
}

const DATA_OFFSET: usize = offset_of!(rtb_str, utf8);

// Largest payload a single object can describe (`isize::MAX` bytes including the header).
const MAX_TEXT_LEN: usize = isize::MAX as usize - DATA_OFFSET;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleFault {
    Null,
    Misaligned { addr: usize },
    TooLong { len: usize },
}

impl std::fmt::Display for HandleFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandleFault::Null => f.write_str("null text handle"),
            HandleFault::Misaligned { addr } => write!(
                f,
                "misaligned text handle at {addr:#x} (expected {}-byte alignment)",
                align_of::<rtb_str>()
            ),
            HandleFault::TooLong { len } => {
                write!(f, "text handle length {len} does not fit in memory")
            }
        }
    }
}

/// Borrowed, read-only view of a text value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Text<'a> {
    bytes: &'a [u8],
}

impl<'a> Text<'a> {
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Text { bytes }
    }

    /// Validates a raw handle and borrows its bytes.
    ///
    /// # Safety
    ///
    /// A non-null, aligned `ptr` must point to a live `rtb_str` whose `len`
    /// bytes are readable for `'a`. Null, misaligned and impossible lengths are
    /// rejected without reading the payload.
    pub unsafe fn from_raw(ptr: *const rtb_str) -> Result<Text<'a>, HandleFault> {
        if ptr.is_null() {
            return Err(HandleFault::Null);
        }
        let addr = ptr as usize;
        if addr % align_of::<rtb_str>() != 0 {
            return Err(HandleFault::Misaligned { addr });
        }
        let len = core::ptr::addr_of!((*ptr).len).read();
        if len > MAX_TEXT_LEN || addr.checked_add(DATA_OFFSET + len).is_none() {
            return Err(HandleFault::TooLong { len });
        }
        let data = ptr.cast::<u8>().add(DATA_OFFSET);
        Ok(Text {
            bytes: core::slice::from_raw_parts(data, len),
        })
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Owned storage laid out as an `rtb_str`, for Rust hosts and tests that need
/// to hand a handle to the builtins.
pub struct TextBuf {
    // Word-sized storage keeps the header aligned.
    words: Vec<usize>,
}

impl TextBuf {
    pub fn new(bytes: &[u8]) -> Self {
        let word = size_of::<usize>();
        let n = DATA_OFFSET / word + bytes.len().div_ceil(word);
        let mut words = vec![0usize; n];
        words[0] = bytes.len();
        // SAFETY: `words` spans DATA_OFFSET + bytes.len() bytes (rounded up to a word).
        unsafe {
            core::ptr::copy_nonoverlapping(
                bytes.as_ptr(),
                words.as_mut_ptr().cast::<u8>().add(DATA_OFFSET),
                bytes.len(),
            );
        }
        TextBuf { words }
    }

    pub fn as_ptr(&self) -> *const rtb_str {
        self.words.as_ptr().cast()
    }

    pub fn text(&self) -> Text<'_> {
        // SAFETY: the buffer was laid out by `new` and lives as long as the borrow.
        let bytes = unsafe {
            core::slice::from_raw_parts(
                self.words.as_ptr().cast::<u8>().add(DATA_OFFSET),
                self.words[0],
            )
        };
        Text { bytes }
    }
}

impl std::fmt::Debug for TextBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuf")
            .field("len", &self.words[0])
            .finish()
    }
}
