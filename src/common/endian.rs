/// Byte order of the debugged target.
///
/// GDB expects register and memory dumps in _target_ byte order, which is not
/// necessarily the byte order of the host running the stub.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl Endianness {
    /// Byte order of the host this crate was compiled for.
    pub const fn native() -> Endianness {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }
}

impl Default for Endianness {
    fn default() -> Self {
        Endianness::native()
    }
}
