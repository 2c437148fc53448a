use std::collections::HashSet;

pub const MEM_SIZE: usize = 0x1_0000;
pub const PC: usize = 15;
pub const NUM_REGS: usize = 16;

/// Why the emulator stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    DoneStep,
    Break,
    Halted,
}

/// A very small 32-bit machine.
///
/// Every instruction is a single little-endian word: `0` halts, anything else
/// is added to `r0`.
pub struct Emu {
    pub regs: [u32; NUM_REGS],
    pub mem: Vec<u8>,
    pub breakpoints: HashSet<u32>,
}

impl Emu {
    pub fn new(program: &[u32]) -> Emu {
        let mut mem = vec![0; MEM_SIZE];
        for (i, word) in program.iter().enumerate() {
            mem[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
        }

        Emu {
            regs: [0; NUM_REGS],
            mem,
            breakpoints: HashSet::new(),
        }
    }

    fn fetch(&self, addr: u32) -> u32 {
        let addr = addr as usize % MEM_SIZE;
        let mut word = [0; 4];
        for (i, b) in word.iter_mut().enumerate() {
            *b = self.mem[(addr + i) % MEM_SIZE];
        }
        u32::from_le_bytes(word)
    }

    pub fn step(&mut self) -> Event {
        let insn = self.fetch(self.regs[PC]);
        if insn == 0 {
            return Event::Halted;
        }

        self.regs[0] = self.regs[0].wrapping_add(insn);
        self.regs[PC] = self.regs[PC].wrapping_add(4);

        if self.breakpoints.contains(&self.regs[PC]) {
            Event::Break
        } else {
            Event::DoneStep
        }
    }

    pub fn run(&mut self) -> Event {
        loop {
            match self.step() {
                Event::DoneStep => {}
                event => return event,
            }
        }
    }

    pub fn read_mem(&self, addr: u64, len: usize) -> Option<Vec<u8>> {
        let start = addr as usize;
        self.mem.get(start..start.checked_add(len)?).map(|s| s.to_vec())
    }

    pub fn write_mem(&mut self, addr: u64, data: &[u8]) -> bool {
        let start = addr as usize;
        match start
            .checked_add(data.len())
            .and_then(|end| self.mem.get_mut(start..end))
        {
            Some(dst) => {
                dst.copy_from_slice(data);
                true
            }
            None => false,
        }
    }
}
