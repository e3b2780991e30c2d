use pinocchio::program_error::ProgramError;

/// Zero-copy view over account bytes.
///
/// Implementors must be `#[repr(C)]` structs built only from byte arrays so
/// that their alignment is 1 and any slice of `LEN` bytes is a valid value.
pub trait Transmutable: Sized {
    const LEN: usize;

    /// Load from bytes without copying (unsafe)
    unsafe fn load_unchecked(data: &[u8]) -> Result<&Self, ProgramError> {
        if data.len() < Self::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        Ok(&*(data.as_ptr() as *const Self))
    }
}

/// Trait for mutable transmutation
pub trait TransmutableMut: Transmutable {
    /// Load mutable reference from bytes (unsafe)
    unsafe fn load_mut_unchecked(data: &mut [u8]) -> Result<&mut Self, ProgramError> {
        if data.len() < Self::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        Ok(&mut *(data.as_mut_ptr() as *mut Self))
    }
}

/// Trait for types that can be converted into bytes reference
pub trait IntoBytes {
    fn into_bytes(&self) -> Result<&[u8], ProgramError>;
}

/// Implements the three traits for an alignment-1 account struct.
#[macro_export]
macro_rules! impl_account_bytes {
    ($ty:ty) => {
        impl $crate::Transmutable for $ty {
            const LEN: usize = core::mem::size_of::<$ty>();
        }

        impl $crate::TransmutableMut for $ty {}

        impl $crate::IntoBytes for $ty {
            fn into_bytes(&self) -> Result<&[u8], pinocchio::program_error::ProgramError> {
                Ok(unsafe {
                    core::slice::from_raw_parts(
                        self as *const Self as *const u8,
                        <$ty as $crate::Transmutable>::LEN,
                    )
                })
            }
        }
    };
}
