//! CRC-16-CCITT over payload bytes, and strict little-endian primitive I/O.
//!
//! Polynomial 0x1021, initial value 0x0000, no final XOR, MSB-first: the
//! same table-driven algorithm the MCU firmware uses
//! (`vedderb/bldc/crc.c`), so host and MCU checksums always agree.

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

static CRC16_TABLE: [u16; 256] = build_table();

/// Computes the CRC-16-CCITT checksum of `payload`.
///
/// `crc = table[((crc>>8) ^ byte) & 0xFF] ^ (crc<<8)`, starting from 0.
pub fn crc16(payload: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in payload {
        let index = (((crc >> 8) ^ u16::from(byte)) & 0xFF) as usize;
        crc = CRC16_TABLE[index] ^ (crc << 8);
    }
    crc
}
