use crate::core_parser::CoreParser;
use crate::errors::ParseError;
use crate::models::Driver;

const VEHICLE_FILENAME_SLOT: usize = 32;

/// Parses the count prefixed driver table. Drivers are returned in replay order.
pub fn parse_drivers(rlp: &mut CoreParser, limit: usize) -> Result<Vec<Driver>, ParseError> {
    rlp.list_of(limit, parse_driver)
}

fn parse_driver(rlp: &mut CoreParser) -> Result<Driver, ParseError> {
    let number = rlp.take_u8()?;
    let name = rlp.parse_text(1)?;
    let codriver_name = Some(rlp.parse_text(1)?).filter(|x| !x.is_empty());
    let vehicle_name = rlp.parse_text(2)?;
    let vehicle_version = rlp.parse_text(2)?;
    let vehicle_id = rlp.parse_text(2)?;
    let vehicle_filename = rlp.parse_fixed_text(VEHICLE_FILENAME_SLOT)?;
    rlp.skip(49)?;

    // Two floats of unknown meaning
    rlp.take_f32()?;
    rlp.take_f32()?;

    Ok(Driver {
        number,
        name,
        codriver_name,
        vehicle_name,
        vehicle_version,
        vehicle_id,
        vehicle_filename,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_bytes(number: u8, name: &str, codriver: &str, filename: &str) -> Vec<u8> {
        let mut data = vec![number, name.len() as u8];
        data.extend_from_slice(name.as_bytes());
        data.push(codriver.len() as u8);
        data.extend_from_slice(codriver.as_bytes());
        for s in ["Oreca 07", "2.05", "LMP2-22"] {
            data.extend((s.len() as u16).to_le_bytes());
            data.extend_from_slice(s.as_bytes());
        }

        let mut slot = [0x7fu8; 32];
        slot[..filename.len()].copy_from_slice(filename.as_bytes());
        slot[filename.len()] = 0;
        data.extend(slot);
        data.extend([0u8; 49]);
        data.extend(12.5f32.to_le_bytes());
        data.extend((-3.0f32).to_le_bytes());
        data
    }

    #[test]
    fn driver_table_in_file_order() {
        let mut data = 2u32.to_le_bytes().to_vec();
        data.extend(driver_bytes(22, "A. Driver", "", "ORECA_22.VEH"));
        data.extend(driver_bytes(7, "B. Driver", "C. Driver", "ORECA_7.VEH"));

        let mut parser = CoreParser::new(&data[..]);
        let drivers = parse_drivers(&mut parser, 100).unwrap();
        assert_eq!(parser.bytes_read(), data.len());
        assert_eq!(drivers.len(), 2);

        assert_eq!(
            drivers[0],
            Driver {
                number: 22,
                name: String::from("A. Driver"),
                codriver_name: None,
                vehicle_name: String::from("Oreca 07"),
                vehicle_version: String::from("2.05"),
                vehicle_id: String::from("LMP2-22"),
                vehicle_filename: String::from("ORECA_22.VEH"),
            }
        );

        assert_eq!(drivers[1].number, 7);
        assert_eq!(drivers[1].codriver_name.as_deref(), Some("C. Driver"));
        assert_eq!(drivers[1].vehicle_filename, "ORECA_7.VEH");
    }

    #[test]
    fn driver_table_empty() {
        let data = 0u32.to_le_bytes();
        let mut parser = CoreParser::new(&data[..]);
        assert_eq!(parse_drivers(&mut parser, 100).unwrap(), Vec::new());
    }

    #[test]
    fn driver_table_truncated() {
        let mut data = 1u32.to_le_bytes().to_vec();
        let driver = driver_bytes(1, "A", "", "X.VEH");
        data.extend_from_slice(&driver[..driver.len() - 2]);
        let mut parser = CoreParser::new(&data[..]);
        assert_eq!(
            parse_drivers(&mut parser, 100),
            Err(ParseError::BufferUnderrun(4, 2))
        );
    }

    #[test]
    fn driver_table_count_over_limit() {
        let data = 5000u32.to_le_bytes();
        let mut parser = CoreParser::new(&data[..]);
        assert_eq!(
            parse_drivers(&mut parser, 1024),
            Err(ParseError::ListTooLarge(5000))
        );
    }
}
