// ==========================================
// 集成测试共享替身
// ==========================================

#![allow(dead_code)]

pub mod mock_config;
pub mod mock_repo;
pub mod recording;
