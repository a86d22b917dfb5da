//! Class labels per model.
//!
//! Order follows the alphabetical folder names the models were trained on
//! and must not be changed without retraining.

pub const OUTER: &[&str] = &[
    "블루종/MA-1",       // blouson_ma1
    "코트",              // coat
    "플리스",            // fleece
    "레더/라이더 자켓",  // leather_jacket
    "경량 패딩",         // light_padding
    "롱패딩",            // long_padding
    "무스탕",            // mustang
    "패딩 베스트",       // padding_vest
    "숏패딩",            // short_padding
];

pub const INNER1: &[&str] = &[
    "카디건",         // cardigan
    "후드티",         // hoodie
    "니트/스웨터",    // knit
    "맨투맨/스웨트",  // sweatshirt
];

pub const INNER2: &[&str] = &[
    "긴팔티",         // long_sleeve
    "셔츠",           // shirt
    "반팔티",         // short_sleeve
    "목폴라/터틀넥",  // turtleneck
];

pub const BOTTOM: &[&str] = &[
    "카고팬츠",           // cargo
    "코듀로이",           // corduroy
    "면바지/치노",        // cotton_chino
    "청바지/데님",        // jeans
    "롱스커트",           // long_skirt
    "미디스커트",         // midi_skirt
    "미니스커트",         // mini_skirt
    "슬랙스",             // slacks
    "트레이닝/조거 팬츠", // training_jogger
];

pub const PATTERN: &[&str] = &[
    "카모",           // camo
    "체크",           // check
    "그래픽/레터링",  // graphic
    "로고",           // logo
    "무지",           // plain
    "스트라이프",     // stripe
];
