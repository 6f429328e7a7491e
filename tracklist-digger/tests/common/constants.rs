pub const BASE_URL: &str = "https://mixes.test";
pub const ARTIST: &str = "Ben UFO";

pub const CATEGORY_URL: &str = "https://mixes.test/w/Category:Ben_UFO";
pub const CATEGORY_PAGE_2_URL: &str =
    "https://mixes.test/w/index.php?title=Category:Ben_UFO&pagefrom=2012";

pub const FACT_MIX_TITLE: &str = "2008-06-18 - Ben UFO - FACT Mix 08";
pub const FACT_MIX_URL: &str = "https://mixes.test/w/2008-06-18_-_Ben_UFO_-_FACT_Mix_08";

pub const RINSE_MIX_TITLE: &str = "2010-02-03 - Ben UFO - Rinse FM";
pub const RINSE_MIX_URL: &str = "https://mixes.test/w/2010-02-03_-_Ben_UFO_-_Rinse_FM";

pub const BOILER_ROOM_TITLE: &str = "2012-05 - Ben UFO @ Boiler Room";
pub const BOILER_ROOM_URL: &str = "https://mixes.test/w/2012-05_-_Ben_UFO_@_Boiler_Room";

pub const BROKEN_MIX_TITLE: &str = "2013-01-01 - Ben UFO - Lost Tape";
pub const BROKEN_MIX_URL: &str = "https://mixes.test/w/2013-01-01_-_Ben_UFO_-_Lost_Tape";

pub const EXPLORER_ONLY_TITLE: &str = "2015-07-11 - Ben UFO @ Dekmantel";
pub const EXPLORER_EMPTY_TITLE: &str = "2016-01-01 - Ben UFO - No Tracks";
