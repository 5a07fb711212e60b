// 各测试文件只使用其中一部分
#![allow(dead_code)]

pub mod api_test_helper;
pub mod test_data_builder;
