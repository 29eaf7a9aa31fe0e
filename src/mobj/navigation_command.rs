/*
# Navigation Commands

 One 12-byte HDMV instruction:

 ```text
 operand_count:3 command_group:2 command_sub_group:3
 imm_dst:1 imm_src:1 reserved:2 branch_option:4
 reserved:4 compare_option:4
 reserved:3 set_option:5
 destination u32
 source      u32
 ```

 Commands are decoded and named only; nothing here evaluates them.
*/

use serde::Serialize;

use crate::bits::{bits, flag, low_nibble};
use crate::errors::BdResult;
use crate::streams::SeekableStream;

pub const NAVIGATION_COMMAND_SIZE: u64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationCommand {
    pub operand_count: u8,
    pub command_group: u8,
    pub command_sub_group: u8,
    pub immediate_value_flag_destination: bool,
    pub immediate_value_flag_source: bool,
    pub branch_option: u8,
    pub compare_option: u8,
    pub set_option: u8,
    pub destination: u32,
    pub source: u32,
}

impl NavigationCommand {
    pub fn read<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        let [b0, b1, b2, b3] = stream.read_bytes::<4>()?;
        Ok(NavigationCommand {
            operand_count: bits(b0 as u32, 0xE0, 5) as u8,
            command_group: bits(b0 as u32, 0x18, 3) as u8,
            command_sub_group: b0 & 0x07,
            immediate_value_flag_destination: flag(b1, 0x80),
            immediate_value_flag_source: flag(b1, 0x40),
            branch_option: low_nibble(b1),
            compare_option: low_nibble(b2),
            set_option: b3 & 0x1F,
            destination: stream.read_u32()?,
            source: stream.read_u32()?,
        })
    }

    /// Opcode name, e.g. `JUMP TITLE` or `MOVE`. `None` for encodings with no name.
    pub fn mnemonic(&self) -> Option<&'static str> {
        Some(match (self.command_group, self.command_sub_group) {
            (0, 0) => match self.branch_option {
                0x0 => "NOP",
                0x1 => "GOTO",
                0x2 => "BREAK",
                _ => return None,
            },
            (0, 1) => match self.branch_option {
                0x0 => "JUMP OBJECT",
                0x1 => "JUMP TITLE",
                0x2 => "CALL OBJECT",
                0x3 => "CALL TITLE",
                0x4 => "RESUME",
                _ => return None,
            },
            (0, 2) => match self.branch_option {
                0x0 => "PLAY PL",
                0x1 => "PLAY PL PI",
                0x2 => "PLAY PL MK",
                0x3 => "TERMINATE PL",
                0x4 => "LINK PI",
                0x5 => "LINK MK",
                _ => return None,
            },
            (1, 0) => match self.compare_option {
                0x1 => "BC",
                0x2 => "EQ",
                0x3 => "NE",
                0x4 => "GE",
                0x5 => "GT",
                0x6 => "LE",
                0x7 => "LT",
                _ => return None,
            },
            (2, 0) => match self.set_option {
                0x01 => "MOVE",
                0x02 => "SWAP",
                0x03 => "ADD",
                0x04 => "SUB",
                0x05 => "MUL",
                0x06 => "DIV",
                0x07 => "MOD",
                0x08 => "RND",
                0x09 => "AND",
                0x0A => "OR",
                0x0B => "XOR",
                0x0C => "BIT SET",
                0x0D => "BIT CLEAR",
                0x0E => "SHIFT LEFT",
                0x0F => "SHIFT RIGHT",
                _ => return None,
            },
            (2, 1) => match self.set_option {
                0x01 => "SET STREAM",
                0x02 => "SET NV TIMER",
                0x03 => "SET BUTTON PAGE",
                0x04 => "ENABLE BUTTON",
                0x05 => "DISABLE BUTTON",
                0x06 => "SET SECONDARY STREAM",
                0x07 => "POPUP MENU OFF",
                0x08 => "STILL ON",
                0x09 => "STILL OFF",
                0x0A => "SET OUTPUT MODE",
                0x0B => "SET STREAM SS",
                _ => return None,
            },
            _ => return None,
        })
    }

    pub fn is_branch(&self) -> bool {
        self.command_group == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode(bytes: [u8; 12]) -> NavigationCommand {
        NavigationCommand::read(&mut Cursor::new(&bytes[..])).unwrap()
    }

    #[test]
    fn test_jump_title() {
        // operand_count 1, group 0, sub group 1, immediate destination, JUMP TITLE 2
        let cmd = decode([0x21, 0x81, 0x00, 0x00, 0, 0, 0, 2, 0, 0, 0, 0]);
        assert_eq!(cmd.operand_count, 1);
        assert_eq!(cmd.command_group, 0);
        assert_eq!(cmd.command_sub_group, 1);
        assert!(cmd.immediate_value_flag_destination);
        assert!(!cmd.immediate_value_flag_source);
        assert_eq!(cmd.destination, 2);
        assert_eq!(cmd.mnemonic(), Some("JUMP TITLE"));
        assert!(cmd.is_branch());
    }

    #[test]
    fn test_set_and_compare() {
        let mov = decode([0x50, 0x40, 0x00, 0x01, 0, 0, 0, 3, 0, 0, 0, 9]);
        assert_eq!(mov.command_group, 2);
        assert_eq!(mov.mnemonic(), Some("MOVE"));
        assert_eq!(mov.source, 9);

        let lt = decode([0x48, 0x00, 0x07, 0x00, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(lt.mnemonic(), Some("LT"));

        let stream = decode([0x51, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(stream.mnemonic(), Some("SET STREAM"));
    }

    #[test]
    fn test_sub_group_uses_three_bits() {
        let cmd = decode([0x07, 0x00, 0x00, 0x00, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(cmd.command_sub_group, 7);
        assert_eq!(cmd.mnemonic(), None);
    }
}
