#[cfg(test)]
mod tests {
    use crate::clpi::cpi::{read_cpi, CoarseEntry, Cpi, FineEntry};
    use crate::errors::BdError;
    use crate::section::ByteRange;
    use crate::streams::SeekableStream;
    use std::io::Cursor;

    fn build_cpi(ep_map_stream_start_addr: u32) -> Vec<u8> {
        let mut data = vec![
            0x00, 0x00, 0x00, 0x30, // length 48
            0x00, // reserved
            0x01, // CPI type: EP map
            0x00, // reserved
            0x01, // one stream PID entry
            0x10, 0x11, // PID
            0x00, // reserved
            0x04, 0x00, 0x08, 0x00, 0x03, // type 1, 2 coarse, 3 fine
        ];
        data.extend_from_slice(&ep_map_stream_start_addr.to_be_bytes());
        data.extend_from_slice(&[
            0x00, 0x00, 0x00, 0x14, // fine table at +20
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, // coarse: ref 0, pts 1, spn 0
            0x00, 0x00, 0xBF, 0xFF, 0x00, 0x01, 0x23, 0x45, // coarse: ref 2, pts 0x3FFF
            0xAF, 0xFF, 0xFF, 0xFF, // fine: angle change, all fields saturated
            0x00, 0x00, 0x00, 0x00, // fine
            0x00, 0x00, 0x00, 0x00, // fine
        ]);
        data
    }

    #[test]
    fn test_ep_map() {
        let data = build_cpi(14);
        assert_eq!(data.len(), 52);
        let mut s = Cursor::new(&data[..]);
        let cpi = read_cpi(&mut s, ByteRange::new(0, 52)).unwrap().unwrap();

        assert_eq!(cpi.cpi_type, 1);
        assert_eq!(cpi.stream_pid_entries.len(), 1);
        let e = &cpi.stream_pid_entries[0];
        assert_eq!(e.stream_pid, 0x1011);
        assert_eq!(e.ep_stream_type, 1);
        assert_eq!(e.number_of_ep_coarse_entries, 2);
        assert_eq!(e.number_of_ep_fine_entries, 3);
        assert_eq!(e.ep_fine_table_start_addr, 20);
        assert_eq!(
            e.coarse_entries[1],
            CoarseEntry {
                ref_to_ep_fine_id: 2,
                pts_ep_coarse: 0x3FFF,
                spn_ep_coarse: 0x12345,
            }
        );
        assert_eq!(
            e.fine_entries[0],
            FineEntry {
                is_angle_change_point: true,
                i_end_position_offset: 2,
                pts_ep_fine: 0x7FF,
                spn_ep_fine: 0x1FFFF,
            }
        );
        assert_eq!(e.fine_entries.len(), 3);
        assert_eq!(s.tell().unwrap(), 52);
    }

    #[test]
    fn test_zero_length_cpi_is_empty() {
        let data = [0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF];
        let mut s = Cursor::new(&data[..]);
        let cpi = read_cpi(&mut s, ByteRange::new(0, 6)).unwrap();
        assert_eq!(cpi, Some(Cpi::default()));
        assert_eq!(s.tell().unwrap(), 4);
    }

    #[test]
    fn test_empty_section_is_absent() {
        let mut s = Cursor::new(Vec::<u8>::new());
        assert_eq!(read_cpi(&mut s, ByteRange::new(80, 80)).unwrap(), None);
    }

    #[test]
    fn test_jump_past_cpi_end_is_fatal() {
        let data = build_cpi(0x400);
        let err = read_cpi(&mut Cursor::new(&data[..]), ByteRange::new(0, 52)).unwrap_err();
        assert!(matches!(err.root(), BdError::VariantDecodeFailure { .. }));
    }

    #[test]
    fn test_coarse_word_saturated_ref() {
        let c = CoarseEntry::from_words(0xFFFF_C000 | 0x0123, 7);
        assert_eq!(c.ref_to_ep_fine_id, 0x3FFFF);
        assert_eq!(c.pts_ep_coarse, 0x0123);
    }
}
