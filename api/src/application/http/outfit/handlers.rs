pub mod analyze_outfit;
pub mod re_recommend;
