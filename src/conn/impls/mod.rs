mod tcpstream;
#[cfg(unix)]
mod unixstream;
mod vec;
