use nih_plug::prelude::Enum;

/// Every response the filter can be switched to. The declaration order is the host-facing order,
/// so it must not change once presets exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[repr(usize)]
pub enum FilterAlgorithm {
    #[name = "LPF1P"]
    Lpf1p,
    #[name = "LPF1"]
    Lpf1,
    #[name = "HPF1"]
    Hpf1,
    #[name = "LPF2"]
    Lpf2,
    #[name = "HPF2"]
    Hpf2,
    #[name = "BPF2"]
    Bpf2,
    #[name = "BSF2"]
    Bsf2,
    #[name = "ButterLPF2"]
    ButterLpf2,
    #[name = "ButterHPF2"]
    ButterHpf2,
    #[name = "ButterBPF2"]
    ButterBpf2,
    #[name = "ButterBSF2"]
    ButterBsf2,
    #[name = "MMALPF2"]
    MmaLpf2,
    #[name = "MMALPF2B"]
    MmaLpf2b,
    #[name = "LowShelf"]
    LowShelf,
    #[name = "HiShelf"]
    HiShelf,
    #[name = "NCQParaEQ"]
    NcqParaEq,
    #[name = "CQParaEQ"]
    CqParaEq,
    #[name = "LWRLPF2"]
    LwrLpf2,
    #[name = "LWRHPF2"]
    LwrHpf2,
    #[name = "APF1"]
    Apf1,
    #[name = "APF2"]
    Apf2,
    #[name = "ResonA"]
    ResonA,
    #[name = "ResonB"]
    ResonB,
    #[name = "MatchLP2A"]
    MatchLp2a,
    #[name = "MatchLP2B"]
    MatchLp2b,
    #[name = "MatchBP2A"]
    MatchBp2a,
    #[name = "MatchBP2B"]
    MatchBp2b,
    #[name = "ImpInvLP1"]
    ImpInvLp1,
    #[name = "ImpInvLP2"]
    ImpInvLp2,
}

impl FilterAlgorithm {
    pub const ALL: [FilterAlgorithm; 29] = [
        Self::Lpf1p,
        Self::Lpf1,
        Self::Hpf1,
        Self::Lpf2,
        Self::Hpf2,
        Self::Bpf2,
        Self::Bsf2,
        Self::ButterLpf2,
        Self::ButterHpf2,
        Self::ButterBpf2,
        Self::ButterBsf2,
        Self::MmaLpf2,
        Self::MmaLpf2b,
        Self::LowShelf,
        Self::HiShelf,
        Self::NcqParaEq,
        Self::CqParaEq,
        Self::LwrLpf2,
        Self::LwrHpf2,
        Self::Apf1,
        Self::Apf2,
        Self::ResonA,
        Self::ResonB,
        Self::MatchLp2a,
        Self::MatchLp2b,
        Self::MatchBp2a,
        Self::MatchBp2b,
        Self::ImpInvLp1,
        Self::ImpInvLp2,
    ];

    /// Resolves a raw selector index. `None` means the index names no algorithm, which the
    /// filter treats as a pass-through. Unlike [`Enum::from_index()`], nothing is clamped.
    pub fn from_repr(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        Self::variants()[self as usize]
    }

    /// Types that realize their gain by blending the filtered signal back into the dry input
    /// (`dry = 1`, `wet = mu - 1`) instead of through the coefficients alone.
    pub fn mixes_dry_signal(self) -> bool {
        matches!(self, Self::LowShelf | Self::HiShelf | Self::NcqParaEq)
    }
}
