use mausim_core::soc::RegisterSink;
use mausim_core::Result;
use mockall::mock;

mock! {
    pub Sink {}
    impl RegisterSink for Sink {
        fn out_word(&mut self, addr: u32, value: u32) -> Result<()>;
        fn indirect_write(&mut self, addr: u64, data0: u64, data1: u64) -> Result<()>;
    }
}
