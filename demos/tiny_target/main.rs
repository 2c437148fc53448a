//! A toy target answering a GDB client over TCP.
//!
//! Run with `RUST_LOG=trace cargo run --example tiny_target`, then connect
//! with `target remote :9001` from GDB.

use gdbconn::{BreakpointType, Endianness, GdbConnection, Request, Response, Signal};

pub type DynResult<T> = Result<T, Box<dyn std::error::Error>>;

mod emu;

use emu::{Emu, Event, NUM_REGS, PC};

const PROGRAM: &[u32] = &[1, 2, 3, 4, 5, 0];

fn stop_reply(emu: &Emu, event: Event) -> Response {
    match event {
        Event::Halted => Response::Exited(emu.regs[0] as u8),
        Event::DoneStep | Event::Break => Response::ThreadStop {
            signal: Signal::SIGTRAP,
            info: vec![(format!("{:02x}", PC), emu.regs[PC] as u64)],
        },
    }
}

fn handle(emu: &mut Emu, request: Request) -> Response {
    match request {
        Request::QueryLastSignal => Response::SignalStop(Signal::SIGTRAP),
        Request::ReadRegisters => Response::RegisterReadResult(
            emu.regs.iter().flat_map(|r| r.to_le_bytes()).collect(),
        ),
        Request::WriteRegisters(req) => {
            for (reg, chunk) in emu.regs.iter_mut().zip(req.data.chunks_exact(4)) {
                *reg = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            }
            Response::Ok
        }
        Request::ReadRegister(req) => match emu.regs.get(req.reg as usize) {
            Some(r) => Response::RegisterReadResult(r.to_le_bytes().to_vec()),
            None => Response::Error(0x16),
        },
        Request::WriteRegister(req) if (req.reg as usize) < NUM_REGS => {
            emu.regs[req.reg as usize] = req.value as u32;
            Response::Ok
        }
        Request::ReadMemory(req) => match emu.read_mem(req.addr, req.len) {
            Some(data) => Response::MemoryReadResult(data),
            None => Response::Error(0x0e),
        },
        Request::WriteMemory(req) | Request::WriteMemoryBinary(req) => {
            if emu.write_mem(req.addr, &req.data) {
                Response::Ok
            } else {
                Response::Error(0x0e)
            }
        }
        Request::InsertBreakpoint(bp) if bp.type_ == BreakpointType::Software => {
            emu.breakpoints.insert(bp.addr as u32);
            Response::Ok
        }
        Request::RemoveBreakpoint(bp) if bp.type_ == BreakpointType::Software => {
            emu.breakpoints.remove(&(bp.addr as u32));
            Response::Ok
        }
        Request::Continue(req) => {
            if let Some(addr) = req.addr {
                emu.regs[PC] = addr as u32;
            }
            let event = emu.run();
            stop_reply(emu, event)
        }
        Request::Step(req) => {
            if let Some(addr) = req.addr {
                emu.regs[PC] = addr as u32;
            }
            let event = emu.step();
            stop_reply(emu, event)
        }
        Request::Query(q) => match q.command.as_str() {
            "qSupported" => Response::QueryReply("PacketSize=1000".into()),
            "qAttached" => Response::QueryReply("1".into()),
            "qC" => Response::QueryReply("QC1".into()),
            "qfThreadInfo" => Response::QueryReply("m1".into()),
            "qsThreadInfo" => Response::QueryReply("l".into()),
            "qRcmd" => Response::ConsoleOutput(format!("unknown command: {}\n", q.extension)),
            _ => Response::NotSupported,
        },
        Request::SetThread(_) | Request::ThreadAlive(_) => Response::Ok,
        Request::Interrupt => Response::SignalStop(Signal::SIGINT),
        Request::Kill | Request::Detach(_) => Response::Ok,
        _ => Response::NotSupported,
    }
}

fn main() -> DynResult<()> {
    pretty_env_logger::init();

    let mut emu = Emu::new(PROGRAM);

    let mut conn: GdbConnection = GdbConnection::builder()
        .endianness(Endianness::Little)
        .register_width(4)
        .build()?;
    conn.initialize(9001)?;

    loop {
        let request = conn.process_request()?;
        let is_monitor_cmd = matches!(&request, Request::Query(q) if q.command == "qRcmd");
        let ends_session = request.ends_session();

        conn.send_response(&handle(&mut emu, request))?;
        if is_monitor_cmd {
            // console output must be followed by a final result
            conn.send_response(&Response::Ok)?;
        }
        if ends_session {
            break;
        }
    }

    println!("Program state at disconnect: r0 = {}", emu.regs[0]);
    Ok(())
}
