use crate::guid::Guid;
use uuid::uuid;

/// The MSDDS reference table compiled into the binary.
pub const BUNDLED_RESOURCE: &str = include_str!("../../data/msdds.md");

/// Config file location, relative to `$HOME`.
pub const CONFIG_RELATIVE_PATH: &str = ".config/ddsref/config.toml";

pub const EXIT_NOT_FOUND: u8 = 1;
pub const EXIT_MALFORMED: u8 = 2;

/// MSDDS Diagram Control 80 (ProgID `MSDDS.Diagram.080`)
pub const CLSID_MSDDS_DIAGRAM: Guid =
    Guid::from_uuid(uuid!("c795d2fe-7776-11d8-9070-00065b840d9c"));
/// Microsoft DDS Form 2.0 (ProgID `MSDDS.Form.080.1`)
pub const CLSID_DDS_FORM: Guid = Guid::from_uuid(uuid!("77d2c92e-7779-11d8-9070-00065b840d9c"));
pub const IID_DDS_POLYLINE: Guid = Guid::from_uuid(uuid!("77d2c902-7779-11d8-9070-00065b840d9c"));
pub const IID_CONTROL_EVENTS: Guid =
    Guid::from_uuid(uuid!("77d2c934-7779-11d8-9070-00065b840d9c"));

/// Microsoft DT PolyLine Control 2 (ProgID `MSDTPolylineControl.2`)
pub const CLSID_MSDT_POLYLINE: Guid =
    Guid::from_uuid(uuid!("d24d4453-1f01-11d1-8e63-006097d2df48"));
/// Microsoft DT Label Control (ProgID `MSDTDDSLabel.1`)
pub const CLSID_MSDT_DDSLABEL: Guid =
    Guid::from_uuid(uuid!("d24d4451-1f01-11d1-8e63-006097d2df48"));
/// Microsoft DT Diagram Surface 2 (ProgID `MSDTDDS.2`)
pub const CLSID_MSDTDDS: Guid = Guid::from_uuid(uuid!("b0406340-b0c5-11d0-89a9-00a0c9054129"));
/// MSDTDDGridCtrl2 Object (ProgID `SchGrid.MSDTDDGridCtrl2.1`)
pub const CLSID_SCHGRID: Guid = Guid::from_uuid(uuid!("e9b0e6d9-811c-11d0-ad51-00a0c90f5739"));
/// Microsoft Data Tools DSRef Object (ProgID `DSRefObject2.Simple`)
pub const CLSID_DSREF: Guid = Guid::from_uuid(uuid!("e9b0e6db-811c-11d0-ad51-00a0c90f5739"));
/// Microsoft Visual Studio Data DSRef Object
pub const CLSID_VS_DSREF: Guid = Guid::from_uuid(uuid!("e09ee6ac-fef0-41ae-9f77-3c394da49849"));
pub const IID_DSREF_CONSUMER: Guid =
    Guid::from_uuid(uuid!("ab36de42-2bf4-11ce-ab3c-00aa004404fb"));
pub const IID_DSREF_PROVIDER: Guid =
    Guid::from_uuid(uuid!("ab36de41-2bf4-11ce-ab3c-00aa004404fb"));
/// `mdt2dd.dll`
pub const LIBID_DTDDS2: Guid = Guid::from_uuid(uuid!("b0406341-b0c5-11d0-89a9-00a0c9054129"));
