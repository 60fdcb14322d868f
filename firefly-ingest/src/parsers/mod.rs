pub mod bb_cp;
pub mod bb_lc;
pub mod ourocard_ofx;
pub mod rico_cc;

pub use bb_cp::parse_bb_cp_csv;
pub use bb_lc::{BbLcParser, BbLcStatement, OutputRecord, parse_bb_lc_text};
pub use ourocard_ofx::{OfxTransaction, parse_ofx_text};
pub use rico_cc::parse_rico_sheet;
