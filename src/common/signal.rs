/// Signal numbers carried by `C`/`S`/`I` requests and by stop replies.
///
/// The numbering is GDB's own (target independent) signal table, which only
/// coincidentally matches the Linux numbering for the first few entries. Only
/// the commonly reported signals get a named constant; any other value can
/// still be carried as `Signal(n)`.
///
/// Transcribed from <https://github.com/bminor/binutils-gdb/blob/master/include/gdb/signals.def>
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signal(pub u8);

#[allow(clippy::upper_case_acronyms)]
#[rustfmt::skip]
impl Signal {
    #[doc = "Signal 0 (no signal)"]            pub const SIGZERO:    Self = Self(0);
    #[doc = "Hangup"]                          pub const SIGHUP:     Self = Self(1);
    #[doc = "Interrupt"]                       pub const SIGINT:     Self = Self(2);
    #[doc = "Quit"]                            pub const SIGQUIT:    Self = Self(3);
    #[doc = "Illegal instruction"]             pub const SIGILL:     Self = Self(4);
    #[doc = "Trace/breakpoint trap"]           pub const SIGTRAP:    Self = Self(5);
    #[doc = "Aborted"]                         pub const SIGABRT:    Self = Self(6);
    #[doc = "Emulation trap"]                  pub const SIGEMT:     Self = Self(7);
    #[doc = "Arithmetic exception"]            pub const SIGFPE:     Self = Self(8);
    #[doc = "Killed"]                          pub const SIGKILL:    Self = Self(9);
    #[doc = "Bus error"]                       pub const SIGBUS:     Self = Self(10);
    #[doc = "Segmentation fault"]              pub const SIGSEGV:    Self = Self(11);
    #[doc = "Bad system call"]                 pub const SIGSYS:     Self = Self(12);
    #[doc = "Broken pipe"]                     pub const SIGPIPE:    Self = Self(13);
    #[doc = "Alarm clock"]                     pub const SIGALRM:    Self = Self(14);
    #[doc = "Terminated"]                      pub const SIGTERM:    Self = Self(15);
    #[doc = "Stopped (signal)"]                pub const SIGSTOP:    Self = Self(17);
    #[doc = "Continued"]                       pub const SIGCONT:    Self = Self(19);
    #[doc = "User defined signal 1"]           pub const SIGUSR1:    Self = Self(30);
    #[doc = "User defined signal 2"]           pub const SIGUSR2:    Self = Self(31);
}

impl From<u8> for Signal {
    fn from(raw: u8) -> Self {
        Signal(raw)
    }
}

impl core::fmt::Display for Signal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        #[rustfmt::skip]
        let s = match *self {
            Signal::SIGZERO => "SIGZERO - Signal 0",
            Signal::SIGHUP  => "SIGHUP - Hangup",
            Signal::SIGINT  => "SIGINT - Interrupt",
            Signal::SIGQUIT => "SIGQUIT - Quit",
            Signal::SIGILL  => "SIGILL - Illegal instruction",
            Signal::SIGTRAP => "SIGTRAP - Trace/breakpoint trap",
            Signal::SIGABRT => "SIGABRT - Aborted",
            Signal::SIGEMT  => "SIGEMT - Emulation trap",
            Signal::SIGFPE  => "SIGFPE - Arithmetic exception",
            Signal::SIGKILL => "SIGKILL - Killed",
            Signal::SIGBUS  => "SIGBUS - Bus error",
            Signal::SIGSEGV => "SIGSEGV - Segmentation fault",
            Signal::SIGSYS  => "SIGSYS - Bad system call",
            Signal::SIGPIPE => "SIGPIPE - Broken pipe",
            Signal::SIGALRM => "SIGALRM - Alarm clock",
            Signal::SIGTERM => "SIGTERM - Terminated",
            Signal::SIGSTOP => "SIGSTOP - Stopped (signal)",
            Signal::SIGCONT => "SIGCONT - Continued",
            Signal::SIGUSR1 => "SIGUSR1 - User defined signal 1",
            Signal::SIGUSR2 => "SIGUSR2 - User defined signal 2",
            _ => return write!(f, "signal {}", self.0),
        };

        write!(f, "{}", s)
    }
}
