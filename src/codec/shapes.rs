//! Per-shape payload routines referenced by the registry.
//!
//! Each encode routine writes the fields of one shape in declaration order;
//! the matching decode routine reads them back in the same order.

use crate::codec::frame::{PayloadReader, PayloadWriter};
use crate::message::*;
use crate::utils::error::{EncodeError, PayloadFieldError};

pub(crate) fn encode_connect(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::Connect(p) = payload else {
        return Err(w.mismatch(PayloadShape::Connect, payload));
    };
    w.put_string("remote_addr", &p.remote_addr)?;
    Ok(())
}

pub(crate) fn decode_connect(r: &mut PayloadReader<'_>) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::Connect(PayloadConnect {
        remote_addr: r.take_string("remote_addr")?,
    }))
}

pub(crate) fn encode_auth_password(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::AuthPassword(p) = payload else {
        return Err(w.mismatch(PayloadShape::AuthPassword, payload));
    };
    w.put_string("username", &p.username)?;
    w.put_bytes("password", &p.password)?;
    Ok(())
}

pub(crate) fn decode_auth_password(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::AuthPassword(PayloadAuthPassword {
        username: r.take_string("username")?,
        password: r.take_bytes("password")?,
    }))
}

pub(crate) fn encode_auth_password_backend_error(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::AuthPasswordBackendError(p) = payload else {
        return Err(w.mismatch(PayloadShape::AuthPasswordBackendError, payload));
    };
    w.put_string("username", &p.username)?;
    w.put_bytes("password", &p.password)?;
    w.put_string("reason", &p.reason)?;
    Ok(())
}

pub(crate) fn decode_auth_password_backend_error(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::AuthPasswordBackendError(PayloadAuthPasswordBackendError {
        username: r.take_string("username")?,
        password: r.take_bytes("password")?,
        reason: r.take_string("reason")?,
    }))
}

pub(crate) fn encode_auth_pub_key(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::AuthPubKey(p) = payload else {
        return Err(w.mismatch(PayloadShape::AuthPubKey, payload));
    };
    w.put_string("username", &p.username)?;
    w.put_bytes("key", &p.key)?;
    Ok(())
}

pub(crate) fn decode_auth_pub_key(r: &mut PayloadReader<'_>) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::AuthPubKey(PayloadAuthPubKey {
        username: r.take_string("username")?,
        key: r.take_bytes("key")?,
    }))
}

pub(crate) fn encode_auth_pub_key_backend_error(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::AuthPubKeyBackendError(p) = payload else {
        return Err(w.mismatch(PayloadShape::AuthPubKeyBackendError, payload));
    };
    w.put_string("username", &p.username)?;
    w.put_bytes("key", &p.key)?;
    w.put_string("reason", &p.reason)?;
    Ok(())
}

pub(crate) fn decode_auth_pub_key_backend_error(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::AuthPubKeyBackendError(PayloadAuthPubKeyBackendError {
        username: r.take_string("username")?,
        key: r.take_bytes("key")?,
        reason: r.take_string("reason")?,
    }))
}

pub(crate) fn encode_global_request_unknown(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::GlobalRequestUnknown(p) = payload else {
        return Err(w.mismatch(PayloadShape::GlobalRequestUnknown, payload));
    };
    w.put_string("request_type", &p.request_type)?;
    Ok(())
}

pub(crate) fn decode_global_request_unknown(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::GlobalRequestUnknown(PayloadGlobalRequestUnknown {
        request_type: r.take_string("request_type")?,
    }))
}

pub(crate) fn encode_new_channel(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::NewChannel(p) = payload else {
        return Err(w.mismatch(PayloadShape::NewChannel, payload));
    };
    w.put_string("channel_type", &p.channel_type)?;
    Ok(())
}

pub(crate) fn decode_new_channel(r: &mut PayloadReader<'_>) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::NewChannel(PayloadNewChannel {
        channel_type: r.take_string("channel_type")?,
    }))
}

pub(crate) fn encode_new_channel_failed(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::NewChannelFailed(p) = payload else {
        return Err(w.mismatch(PayloadShape::NewChannelFailed, payload));
    };
    w.put_string("channel_type", &p.channel_type)?;
    w.put_string("reason", &p.reason)?;
    Ok(())
}

pub(crate) fn decode_new_channel_failed(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::NewChannelFailed(PayloadNewChannelFailed {
        channel_type: r.take_string("channel_type")?,
        reason: r.take_string("reason")?,
    }))
}

pub(crate) fn encode_channel_request_unknown_type(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::ChannelRequestUnknownType(p) = payload else {
        return Err(w.mismatch(PayloadShape::ChannelRequestUnknownType, payload));
    };
    w.put_string("request_type", &p.request_type)?;
    Ok(())
}

pub(crate) fn decode_channel_request_unknown_type(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::ChannelRequestUnknownType(PayloadChannelRequestUnknownType {
        request_type: r.take_string("request_type")?,
    }))
}

pub(crate) fn encode_channel_request_decode_failed(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::ChannelRequestDecodeFailed(p) = payload else {
        return Err(w.mismatch(PayloadShape::ChannelRequestDecodeFailed, payload));
    };
    w.put_string("request_type", &p.request_type)?;
    w.put_string("reason", &p.reason)?;
    Ok(())
}

pub(crate) fn decode_channel_request_decode_failed(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::ChannelRequestDecodeFailed(PayloadChannelRequestDecodeFailed {
        request_type: r.take_string("request_type")?,
        reason: r.take_string("reason")?,
    }))
}

pub(crate) fn encode_channel_request_set_env(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::ChannelRequestSetEnv(p) = payload else {
        return Err(w.mismatch(PayloadShape::ChannelRequestSetEnv, payload));
    };
    w.put_string("name", &p.name)?;
    w.put_string("value", &p.value)?;
    Ok(())
}

pub(crate) fn decode_channel_request_set_env(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::ChannelRequestSetEnv(PayloadChannelRequestSetEnv {
        name: r.take_string("name")?,
        value: r.take_string("value")?,
    }))
}

pub(crate) fn encode_channel_request_exec(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::ChannelRequestExec(p) = payload else {
        return Err(w.mismatch(PayloadShape::ChannelRequestExec, payload));
    };
    w.put_string("program", &p.program)?;
    Ok(())
}

pub(crate) fn decode_channel_request_exec(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::ChannelRequestExec(PayloadChannelRequestExec {
        program: r.take_string("program")?,
    }))
}

pub(crate) fn encode_channel_request_pty(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::ChannelRequestPty(p) = payload else {
        return Err(w.mismatch(PayloadShape::ChannelRequestPty, payload));
    };
    w.put_u32(p.columns);
    w.put_u32(p.rows);
    Ok(())
}

pub(crate) fn decode_channel_request_pty(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::ChannelRequestPty(PayloadChannelRequestPty {
        columns: r.take_u32("columns")?,
        rows: r.take_u32("rows")?,
    }))
}

pub(crate) fn encode_channel_request_shell(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::ChannelRequestShell(_) = payload else {
        return Err(w.mismatch(PayloadShape::ChannelRequestShell, payload));
    };
    Ok(())
}

pub(crate) fn decode_channel_request_shell(
    _r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::ChannelRequestShell(PayloadChannelRequestShell {}))
}

pub(crate) fn encode_channel_request_signal(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::ChannelRequestSignal(p) = payload else {
        return Err(w.mismatch(PayloadShape::ChannelRequestSignal, payload));
    };
    w.put_string("signal", &p.signal)?;
    Ok(())
}

pub(crate) fn decode_channel_request_signal(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::ChannelRequestSignal(PayloadChannelRequestSignal {
        signal: r.take_string("signal")?,
    }))
}

pub(crate) fn encode_channel_request_subsystem(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::ChannelRequestSubsystem(p) = payload else {
        return Err(w.mismatch(PayloadShape::ChannelRequestSubsystem, payload));
    };
    w.put_string("subsystem", &p.subsystem)?;
    Ok(())
}

pub(crate) fn decode_channel_request_subsystem(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::ChannelRequestSubsystem(PayloadChannelRequestSubsystem {
        subsystem: r.take_string("subsystem")?,
    }))
}

pub(crate) fn encode_channel_request_window(
    payload: &Payload,
    w: &mut PayloadWriter<'_>,
) -> Result<(), EncodeError> {
    let Payload::ChannelRequestWindow(p) = payload else {
        return Err(w.mismatch(PayloadShape::ChannelRequestWindow, payload));
    };
    w.put_u32(p.columns);
    w.put_u32(p.rows);
    Ok(())
}

pub(crate) fn decode_channel_request_window(
    r: &mut PayloadReader<'_>,
) -> Result<Payload, PayloadFieldError> {
    Ok(Payload::ChannelRequestWindow(PayloadChannelRequestWindow {
        columns: r.take_u32("columns")?,
        rows: r.take_u32("rows")?,
    }))
}
